// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words cbreak

use crate::{DEV_TTY_PATH, TerminalMode, TracingConfig};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::{path::PathBuf, time::Duration};
use tracing_core::LevelFilter;

#[derive(Debug, Parser)]
#[command(bin_name = "ttyctl")]
#[command(about = "Inspect and change the input modes of a terminal")]
#[command(version)]
#[command(next_line_help = true)]
#[command(arg_required_else_help(true))]
/// More info:
/// - <https://docs.rs/clap/latest/clap/_derive/#overview>
/// - <https://developerlife.com/2023/09/17/tuify-clap/>
pub struct CLIArg {
    #[command(subcommand)]
    pub command: CLICommand,

    #[command(flatten)]
    pub global_options: GlobalOption,
}

#[derive(Debug, Args)]
pub struct GlobalOption {
    #[arg(
        global = true,
        long,
        short = 'd',
        value_name = "PATH",
        default_value = DEV_TTY_PATH,
        help = "Terminal device to operate on"
    )]
    pub device: PathBuf,

    #[arg(
        global = true,
        long,
        value_enum,
        default_value_t = LogLevel::Off,
        help = "Most verbose log level to write to the log file"
    )]
    pub log_level: LogLevel,

    #[arg(
        global = true,
        long,
        value_name = "PATH",
        help = "Log file to write to [default: ttyctl.log]"
    )]
    pub log_file: Option<String>,
}

impl GlobalOption {
    /// Logs only ever go to a file, the terminal may be in raw mode.
    #[must_use]
    pub fn tracing_config(&self) -> TracingConfig {
        TracingConfig::new_file(self.log_file.clone())
            .with_level_filter(self.log_level.into())
    }
}

#[derive(Debug, Subcommand)]
pub enum CLICommand {
    #[clap(about = "Turn echo of typed characters on or off")]
    Echo {
        #[arg(value_enum)]
        state: EchoState,
    },

    #[clap(about = "Switch the input mode and print the mode the terminal ends up in")]
    Mode {
        #[arg(value_enum)]
        mode: ModeArg,
    },

    #[clap(about = "Print the window size as `columns rows`")]
    Size,

    #[clap(
        about = "Read one byte in cbreak or raw mode and print it, then put the terminal back"
    )]
    Read {
        #[arg(
            long,
            value_name = "MICROSECONDS",
            help = "Give up after this long, omit to wait indefinitely"
        )]
        timeout_us: Option<u64>,

        #[arg(long, value_enum, default_value_t = ReadModeArg::Cbreak)]
        mode: ReadModeArg,
    },

    #[clap(about = "Echo typed bytes back in raw mode until `q` is pressed")]
    RawEcho,

    #[clap(about = "Prompt for a password with echo off, and print only its length")]
    Password,

    #[clap(about = "Print the current input mode and echo state")]
    Snapshot,
}

impl CLICommand {
    /// `None` for commands that wait indefinitely.
    #[must_use]
    pub fn read_timeout(&self) -> Option<Duration> {
        match self {
            CLICommand::Read { timeout_us, .. } => timeout_us.map(Duration::from_micros),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EchoState {
    On,
    Off,
}

impl From<EchoState> for bool {
    fn from(state: EchoState) -> Self { matches!(state, EchoState::On) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    #[clap(help = "Line buffered, signals and flow control on")]
    Cooked,
    #[clap(help = "Byte at a time, Ctrl+C still sends SIGINT")]
    Cbreak,
    #[clap(help = "Byte at a time, no signals, no flow control")]
    Raw,
}

impl From<ModeArg> for TerminalMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Cooked => TerminalMode::Cooked,
            ModeArg::Cbreak => TerminalMode::CBreak,
            ModeArg::Raw => TerminalMode::Raw,
        }
    }
}

/// Cooked mode is left out, a single byte read would wait for a whole line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReadModeArg {
    Cbreak,
    Raw,
}

impl From<ReadModeArg> for TerminalMode {
    fn from(mode: ReadModeArg) -> Self {
        match mode {
            ReadModeArg::Cbreak => TerminalMode::CBreak,
            ReadModeArg::Raw => TerminalMode::Raw,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}
