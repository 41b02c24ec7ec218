// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Wrap the given value (or `()`) in `Ok`.
///
/// ```
/// use r3bl_tty::{CommonResult, ok};
///
/// fn unit() -> CommonResult<()> { ok!() }
/// fn value() -> CommonResult<u8> { ok!(42) }
///
/// assert!(unit().is_ok());
/// assert_eq!(value().unwrap(), 42);
/// ```
#[macro_export]
macro_rules! ok {
    // No args.
    () => {
        Ok(())
    };
    // With arg.
    ($value:expr) => {
        Ok($value)
    };
}
