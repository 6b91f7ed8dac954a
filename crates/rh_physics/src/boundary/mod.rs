// crates/rh_physics/src/boundary/mod.rs

//! 边界条件
//!
//! 每个边界条件绑定网格的一个外表面（[`Face`]），在下一次通量
//! 重构读取幽灵层之前填好该面的幽灵单元状态。本地变体
//! （[`Reflecting`] / [`Outflow`]）由内部边界层状态合成幽灵态；
//! 跨进程变体 [`partition::Partition`] 通过外部传输层向邻进程
//! 交换边界层状态。
//!
//! # 不变量
//!
//! `apply` 成功返回后，幽灵层必须满足与内部单元相同的有效性
//! 约束：各槽位有限，密度与能量为正。不满足约束的交换结果是
//! 致命错误，不得部分应用。

pub mod partition;

pub use partition::{Partition, RankExchange};

use thiserror::Error;

use crate::decomposition::RankId;
use crate::grid::{Face, Grid};
use crate::types::{uid, FluidArray};

// ============================================================
// 错误类型
// ============================================================

/// 边界交换错误
///
/// 对交换进程而言是致命的；上层必须终止本进程。
#[derive(Error, Debug)]
pub enum BoundaryError {
    /// 邻进程数据格式错误（长度不符或含无效值）
    #[error("来自{destination}的边界数据无效: {reason}")]
    Malformed {
        /// 对端进程
        destination: RankId,
        /// 具体原因
        reason: String,
    },

    /// 传输层失败
    #[error("与{destination}的边界交换失败")]
    Exchange {
        /// 对端进程
        destination: RankId,
        /// 底层传输错误
        #[source]
        source: rh_foundation::RhError,
    },
}

// ============================================================
// 边界条件抽象
// ============================================================

/// 边界条件
///
/// 每步对每个面恰好调用一次 `apply`；调用后 [`ghost`](Self::ghost)
/// 给出与该面边界层同序的幽灵单元守恒状态。
pub trait BoundaryCondition {
    /// 绑定的网格面
    fn face(&self) -> Face;

    /// 填充幽灵层
    fn apply(&mut self, grid: &Grid) -> Result<(), BoundaryError>;

    /// 幽灵层守恒状态（与边界层单元同序）
    fn ghost(&self) -> &[FluidArray];
}

/// 校验幽灵层满足内部单元的有效性约束
pub(crate) fn validate_ghost_layer(
    layer: &[FluidArray],
    destination: RankId,
) -> Result<(), BoundaryError> {
    for (i, state) in layer.iter().enumerate() {
        for (slot, &value) in state.iter().enumerate() {
            if !value.is_finite() {
                return Err(BoundaryError::Malformed {
                    destination,
                    reason: format!("幽灵单元{}槽位{}非有限: {}", i, slot, value),
                });
            }
        }
        if state[uid::DEN] <= 0.0 || state[uid::PRE] <= 0.0 {
            return Err(BoundaryError::Malformed {
                destination,
                reason: format!(
                    "幽灵单元{}密度/能量非正: den={:e}, pre={:e}",
                    i,
                    state[uid::DEN],
                    state[uid::PRE]
                ),
            });
        }
    }
    Ok(())
}

// ============================================================
// 本地边界条件
// ============================================================

/// 反射边界
///
/// 幽灵态复制内部边界层状态并将法向动量取反（无穿透条件）。
#[derive(Debug)]
pub struct Reflecting {
    face: Face,
    ghost: Vec<FluidArray>,
}

impl Reflecting {
    /// 绑定到一个面
    pub fn new(face: Face) -> Self {
        Self {
            face,
            ghost: Vec::new(),
        }
    }
}

impl BoundaryCondition for Reflecting {
    fn face(&self) -> Face {
        self.face
    }

    fn apply(&mut self, grid: &Grid) -> Result<(), BoundaryError> {
        let axis = self.face.axis;
        self.ghost = grid.boundary_layer_u(self.face);
        for state in &mut self.ghost {
            state[uid::VEL + axis] = -state[uid::VEL + axis];
        }
        Ok(())
    }

    fn ghost(&self) -> &[FluidArray] {
        &self.ghost
    }
}

/// 出流边界
///
/// 零梯度外推：幽灵态直接复制内部边界层状态。
#[derive(Debug)]
pub struct Outflow {
    face: Face,
    ghost: Vec<FluidArray>,
}

impl Outflow {
    /// 绑定到一个面
    pub fn new(face: Face) -> Self {
        Self {
            face,
            ghost: Vec::new(),
        }
    }
}

impl BoundaryCondition for Outflow {
    fn face(&self) -> Face {
        self.face
    }

    fn apply(&mut self, grid: &Grid) -> Result<(), BoundaryError> {
        self.ghost = grid.boundary_layer_u(self.face);
        Ok(())
    }

    fn ghost(&self) -> &[FluidArray] {
        &self.ghost
    }
}

// ============================================================
// 测试
// ============================================================
