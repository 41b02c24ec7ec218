// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! For more information on how to use CLAP, here are some resources:
//! 1. [Tutorial](https://developerlife.com/2023/09/17/tuify-clap/)
//! 2. [Video](https://youtu.be/lzMYDA6St0s)

#[cfg(unix)]
fn main() -> r3bl_tty::CommonResult<()> {
    use clap::Parser;
    use r3bl_tty::{TtyHandle, ok, try_initialize_logging_global,
                   ttyctl::{CLIArg, handle_ttyctl_command}};

    // If no args are passed, the following line will fail, and help will be printed
    // thanks to `arg_required_else_help(true)` in the `CLIArg` struct.
    let cli_arg = CLIArg::parse();

    // Logging is optional, a bad log file path must not stop the command.
    if let Err(error) = try_initialize_logging_global(cli_arg.global_options.tracing_config())
    {
        eprintln!("Logging disabled: {error}");
    }
    // % is Display, ? is Debug.
    tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg);

    let tty = TtyHandle::with_device_path(&cli_arg.global_options.device);
    let mut stdout = std::io::stdout().lock();
    let result = handle_ttyctl_command(&cli_arg, &tty, &mut stdout);

    if let Err(ref error) = result {
        tracing::error!(message = "ttyctl failed", error = ?error);
    }
    tracing::debug!(message = "Stop logging...");

    result?;
    ok!()
}

#[cfg(not(unix))]
fn main() {
    eprintln!("ttyctl only runs on Unix, where terminals are controlled through termios");
    std::process::exit(1);
}
