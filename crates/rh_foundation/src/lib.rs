// crates/rh_foundation/src/lib.rs

//! RadHydro 基础层
//!
//! 提供求解器各层共用的基础设施：
//! - 统一错误类型 (error)
//! - 类型安全索引 (index)
//! - 共享物理常数 (constants)
//!
//! # 设计原则
//!
//! 1. **层次化**: 基础层只定义核心错误与通用类型，物理计算相关的
//!    错误和数据结构在 `rh_physics` 中定义
//! 2. **零依赖核心**: 除错误派生与序列化外不引入其他依赖

pub mod constants;
pub mod error;
pub mod index;

pub use constants::PhysicalConstants;
pub use error::{RhError, RhResult};
pub use index::{cell, join, CellIndex, CellTag, Idx, JoinIndex, JoinTag};

/// 条件检查宏：条件不满足时提前返回错误
///
/// # 示例
///
/// ```
/// use rh_foundation::{ensure, RhError, RhResult};
///
/// fn check(value: i32) -> RhResult<()> {
///     ensure!(value > 0, RhError::invalid_input("value must be positive"));
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err);
        }
    };
}

/// Option 解包宏：值缺失时提前返回错误
#[macro_export]
macro_rules! require {
    ($opt:expr, $err:expr) => {
        match $opt {
            Some(v) => v,
            None => return Err($err),
        }
    };
}
