// crates/rh_physics/src/boundary/partition.rs

//! 分区边界
//!
//! 子域之间的边界条件：幽灵态不由本地状态合成，而是通过外部
//! 传输层与指定邻进程交换边界层状态获得。每步对每个分区面恰好
//! 调用一次；从调用方视角交换是阻塞的点对点操作——本进程的
//! 步进挂起，直到邻进程数据到达或交换失败。本层不设超时：
//! 传输层内的悬挂属于外部故障模式。
//!
//! 交换的前置条件（由外围驱动保证）：在任一邻进程执行本步的
//! 分区交换之前，双方都必须已完成本地通量计算、备好边界层状态。

use rh_foundation::error::RhResult;

use crate::decomposition::RankId;
use crate::grid::{Face, Grid};
use crate::types::FluidArray;

use super::{validate_ghost_layer, BoundaryCondition, BoundaryError};

// ============================================================
// 传输抽象
// ============================================================

/// 进程间边界交换传输
///
/// 由外部通信层实现（线格式不在本层定义）。`exchange` 是阻塞的
/// 点对点操作：把本进程某面的边界层状态发给 `destination`，
/// 返回对端同一共享面的边界层状态。实现必须是 `Send + Sync`，
/// 同一传输句柄可被多个面共享。
pub trait RankExchange: Send + Sync {
    /// 与邻进程交换一层边界状态
    ///
    /// # 参数
    /// - `destination`: 对端进程
    /// - `send`: 本进程边界层守恒状态（面内行优先顺序）
    ///
    /// # 返回
    /// 对端的边界层守恒状态；传输检测到的失败以 `Err` 上报。
    fn exchange(&self, destination: RankId, send: &[FluidArray]) -> RhResult<Vec<FluidArray>>;
}

impl<T: RankExchange + ?Sized> RankExchange for std::sync::Arc<T> {
    fn exchange(&self, destination: RankId, send: &[FluidArray]) -> RhResult<Vec<FluidArray>> {
        (**self).exchange(destination, send)
    }
}

// ============================================================
// 分区边界
// ============================================================

/// 分区边界条件
///
/// 绑定一个网格面和一个目的进程。成功的 `apply` 之后幽灵层
/// 满足与内部单元相同的有效性约束；格式错误或长度不符的
/// 消息是致命的 [`BoundaryError`]，不做部分应用。
pub struct Partition<E: RankExchange> {
    face: Face,
    destination: RankId,
    exchange: E,
    ghost: Vec<FluidArray>,
}

impl<E: RankExchange> Partition<E> {
    /// 绑定面、目的进程与传输句柄
    pub fn new(face: Face, destination: RankId, exchange: E) -> Self {
        Self {
            face,
            destination,
            exchange,
            ghost: Vec::new(),
        }
    }

    /// 目的进程
    #[inline]
    pub fn destination(&self) -> RankId {
        self.destination
    }
}

impl<E: RankExchange> BoundaryCondition for Partition<E> {
    fn face(&self) -> Face {
        self.face
    }

    fn apply(&mut self, grid: &Grid) -> Result<(), BoundaryError> {
        let send = grid.boundary_layer_u(self.face);

        let received = self
            .exchange
            .exchange(self.destination, &send)
            .map_err(|source| BoundaryError::Exchange {
                destination: self.destination,
                source,
            })?;

        if received.len() != send.len() {
            return Err(BoundaryError::Malformed {
                destination: self.destination,
                reason: format!("层长度不符: 期望{}, 实际{}", send.len(), received.len()),
            });
        }
        validate_ghost_layer(&received, self.destination)?;

        // 校验通过后才写入幽灵层，失败时保持上一步的数据不被破坏
        self.ghost = received;
        Ok(())
    }

    fn ghost(&self) -> &[FluidArray] {
        &self.ghost
    }
}

// ============================================================
// 测试
// ============================================================
