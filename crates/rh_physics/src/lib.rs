// crates/rh_physics/src/lib.rs

//! RadHydro 求解器核心
//!
//! 提供辐射流体模拟的状态更新核心，包括：
//! - 变量布局与参数结构 (types)
//! - 守恒/原始/通量表示转换 (conversion)
//! - 网格单元与界面数据模型 (grid)
//! - 流体状态管理器 (fluid) - 推进、下限保护、表示同步、诊断归约
//! - 域分解与所有权判定 (decomposition)
//! - 点源模型 (star)
//! - 边界条件与分区交换 (boundary)
//!
//! 黎曼求解/通量重构、辐射传输与加热冷却源项、进程间消息传输
//! 属于外部协作者，本 crate 只定义与它们的接口契约。

pub mod boundary;
pub mod conversion;
pub mod decomposition;
pub mod fluid;
pub mod grid;
pub mod star;
pub mod types;

// 重导出常用类型
pub use boundary::{BoundaryCondition, BoundaryError, Outflow, Partition, RankExchange, Reflecting};
pub use conversion::{f_from_q, f_from_u, q_from_u, u_from_q};
pub use decomposition::{classify, Ownership, RankBounds, RankId};
pub use fluid::{Fluid, FluidError};
pub use grid::{Face, Grid, GridCell, GridJoin, Side};
pub use star::Star;
pub use types::{uid, FluidArray, FluidParameters, GridParameters, StarParameters, Var};
