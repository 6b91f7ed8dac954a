// crates/rh_physics/src/grid/join.rs

//! 网格界面
//!
//! `GridJoin` 是连接两个单元（或单元与边界）的有向通量通道，
//! 持有待施加的通量向量与界面面积。生命周期与网格相同。
//!
//! # 符号约定
//!
//! 通量加到右侧单元的累加器上、从左侧单元的累加器中减去。
//! 外部的黎曼求解/通量重构阶段负责填充 `f`。

use glam::DVec3;

use rh_foundation::index::CellIndex;

use crate::types::{uid, FluidArray};

/// 网格界面
#[derive(Debug, Clone)]
pub struct GridJoin {
    /// 左侧单元
    pub lcell: CellIndex,
    /// 右侧单元（边界界面为 INVALID）
    pub rcell: CellIndex,
    /// 通量向量：加到右侧单元、从左侧单元减去
    pub f: FluidArray,
    /// 界面中心坐标
    pub xj: DVec3,
    /// 界面面积
    pub area: f64,
    /// 界面法向所在轴
    pub axis: usize,
}

impl Default for GridJoin {
    fn default() -> Self {
        Self {
            lcell: CellIndex::INVALID,
            rcell: CellIndex::INVALID,
            f: [0.0; uid::N],
            xj: DVec3::ZERO,
            area: 0.0,
            axis: 0,
        }
    }
}

impl GridJoin {
    /// 创建连接两个单元的界面
    pub fn between(lcell: CellIndex, rcell: CellIndex, axis: usize, xj: DVec3, area: f64) -> Self {
        Self {
            lcell,
            rcell,
            f: [0.0; uid::N],
            xj,
            area,
            axis,
        }
    }

    /// 是否为边界界面（只有一侧有单元）
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.lcell.is_invalid() || self.rcell.is_invalid()
    }
}

// ============================================================
// 测试
// ============================================================
