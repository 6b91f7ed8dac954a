// crates/rh_physics/src/star.rs

//! 点源（星体）模型
//!
//! 保存星体的位置、风注入参数、所属进程分类和本地格距。
//! 风的注入本身（向风单元写入状态）由外部源项代码执行，
//! 本模块负责持有注入单元集并回答"星体是否归本进程演化"。

use std::sync::Arc;

use rh_foundation::index::CellIndex;
use rh_foundation::PhysicalConstants;

use crate::decomposition::Ownership;
use crate::types::StarParameters;

/// 点源模型
#[derive(Debug, Clone, Default)]
pub struct Star {
    consts: Option<Arc<PhysicalConstants>>,
    params: StarParameters,
    ownership: Option<Ownership>,
    dx: [f64; 3],
    wind_cells: Vec<CellIndex>,
}

impl Star {
    /// 初始化点源
    ///
    /// # 参数
    /// - `consts`: 共享物理常数
    /// - `params`: 星体参数
    /// - `ownership`: 所有权判定结果（星体位置相对本进程区间）
    /// - `dx`: 本地格距
    pub fn initialise(
        &mut self,
        consts: Arc<PhysicalConstants>,
        params: StarParameters,
        ownership: Ownership,
        dx: [f64; 3],
    ) {
        self.consts = Some(consts);
        self.params = params;
        self.ownership = Some(ownership);
        self.dx = dx;
    }

    /// 指派风注入单元集
    pub fn set_wind_cells(&mut self, cells: Vec<CellIndex>) {
        self.wind_cells = cells;
    }

    /// 星体参数
    #[inline]
    pub fn params(&self) -> &StarParameters {
        &self.params
    }

    /// 共享物理常数（未初始化时为 None）
    #[inline]
    pub fn constants(&self) -> Option<&Arc<PhysicalConstants>> {
        self.consts.as_ref()
    }

    /// 所有权分类（未初始化时为 None）
    #[inline]
    pub fn ownership(&self) -> Option<Ownership> {
        self.ownership
    }

    /// 星体是否归本进程演化
    #[inline]
    pub fn is_local(&self) -> bool {
        self.ownership == Some(Ownership::Here)
    }

    /// 本地格距
    #[inline]
    pub fn dx(&self) -> [f64; 3] {
        self.dx
    }

    /// 风注入单元集
    #[inline]
    pub fn wind_cells(&self) -> &[CellIndex] {
        &self.wind_cells
    }
}

// ============================================================
// 测试
// ============================================================
