use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("ucpack {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: ucpack");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "target: {}",
        option_env!("UCPACK_BUILD_TARGET").unwrap_or("unknown")
    );
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!("git_hash: {}", option_env!("GIT_HASH").unwrap_or("unknown"));
    println!(
        "features: link={}, async={}, cli=true",
        cfg!(feature = "link"),
        cfg!(feature = "async")
    );
    println!(
        "wire: start=0x{:02X} end=0x{:02X} crc=CRC-8/MAXIM max_payload={}",
        ucpack_frame::DEFAULT_START_MARKER,
        ucpack_frame::DEFAULT_END_MARKER,
        ucpack_frame::MAX_PAYLOAD
    );

    Ok(SUCCESS)
}
