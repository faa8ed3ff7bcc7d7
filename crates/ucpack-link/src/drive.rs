use crate::error::Result;

/// Differential drive of the robot.
pub trait Drive {
    /// Whether the robot is switched on and accepting motion commands.
    fn is_on(&self) -> bool;

    /// Set linear speed and angular rate. `(0.0, 0.0)` stops the robot.
    fn drive(&mut self, linear: f32, angular: f32) -> Result<()>;
}

impl<D: Drive + ?Sized> Drive for &mut D {
    fn is_on(&self) -> bool {
        (**self).is_on()
    }

    fn drive(&mut self, linear: f32, angular: f32) -> Result<()> {
        (**self).drive(linear, angular)
    }
}
