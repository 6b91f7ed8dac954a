// crates/rh_physics/src/grid/cell.rs

//! 网格单元
//!
//! `GridCell` 保存单元的流体状态（守恒 U、原始 Q、快照 W、通量
//! 累加 UDOT）、辐射/热化学侧数组、几何量和拓扑信息。
//!
//! # 拓扑表示
//!
//! 相邻单元与界面一律通过整数句柄 (`CellIndex`/`JoinIndex`) 引用，
//! 指向所属网格的连续存储表，不持有指针。边界侧的槽位为
//! `INVALID`。
//!
//! # 状态新鲜度
//!
//! U/Q/W 三种表示共存，由调用方按步进协议显式同步
//! （见 [`crate::fluid::Fluid`]）。

use glam::DVec3;

use rh_foundation::index::{CellIndex, JoinIndex};

use crate::types::{uid, FluidArray};

/// 辐射侧数组槽位
///
/// 由外部辐射传输代码写入，本 crate 只负责存储。
pub mod rid {
    /// 单元内光深
    pub const TAU: usize = 0;
    /// 源到单元路径累计光深
    pub const DTAU: usize = 1;
    /// 槽位数
    pub const N: usize = 2;
}

/// 热化学侧数组槽位
pub mod tid {
    /// 加热率
    pub const HEAT: usize = 0;
    /// 冷却率
    pub const COOL: usize = 1;
    /// 槽位数
    pub const N: usize = 2;
}

/// 网格单元
///
/// 密度/能量槽位在任何 `Fluid` 公开操作之后严格为正且有限；
/// 原始表示的电离分数在 [0,1] 内。
#[derive(Debug, Clone)]
pub struct GridCell {
    /// 守恒状态
    pub u: FluidArray,
    /// 原始状态
    pub q: FluidArray,
    /// 守恒状态快照（二阶时间步进用）
    pub w: FluidArray,
    /// 通量累加（守恒量变化率）
    pub udot: FluidArray,

    /// 辐射变量（光深等），外部辐射传输代码维护
    pub rad: [f64; rid::N],
    /// 热化学变量（加热/冷却率），外部热化学代码维护
    pub thermo: [f64; tid::N],

    /// 单元中心坐标
    pub xc: DVec3,
    /// 单元体积
    pub vol: f64,
    /// 源射线穿过单元中心的路径长度
    pub ds: f64,
    /// 以源距为半径、宽度 ds 的球壳体积
    pub shell_vol: f64,

    /// 本单元的绝热指数
    pub heat_capacity_ratio: f64,
    /// 初始条件设定的单元温度下限
    pub t_min: f64,
    /// 缓存的声速
    sound_speed: f64,

    /// 各轴左邻单元
    pub left: [CellIndex; 3],
    /// 各轴右邻单元
    pub right: [CellIndex; 3],
    /// 各轴左侧界面
    pub ljoin: [JoinIndex; 3],
    /// 各轴右侧界面
    pub rjoin: [JoinIndex; 3],

    /// 光深插值用的近邻单元（外部辐射传输代码读取）
    pub neighbour_ids: [CellIndex; 4],
    /// 对应的插值权重
    pub neighbour_weights: [f64; 4],
}

impl Default for GridCell {
    fn default() -> Self {
        Self {
            u: [0.0; uid::N],
            q: [0.0; uid::N],
            w: [0.0; uid::N],
            udot: [0.0; uid::N],
            rad: [0.0; rid::N],
            thermo: [0.0; tid::N],
            xc: DVec3::splat(-10.0),
            vol: 0.0,
            ds: 0.0,
            shell_vol: 0.0,
            heat_capacity_ratio: 0.0,
            t_min: 0.0,
            sound_speed: 0.0,
            left: [CellIndex::INVALID; 3],
            right: [CellIndex::INVALID; 3],
            ljoin: [JoinIndex::INVALID; 3],
            rjoin: [JoinIndex::INVALID; 3],
            neighbour_ids: [CellIndex::INVALID; 4],
            neighbour_weights: [0.0; 4],
        }
    }
}

impl GridCell {
    /// 创建默认单元
    pub fn new() -> Self {
        Self::default()
    }

    /// 缓存声速
    #[inline]
    pub fn set_sound_speed(&mut self, a: f64) {
        self.sound_speed = a;
    }

    /// 读取缓存的声速
    #[inline]
    pub fn sound_speed(&self) -> f64 {
        self.sound_speed
    }

    /// 由原始状态计算温度（电离加权平均分子量的理想气体）
    ///
    /// μ⁻¹ = X·(x_HII + 1) + (1 − X)/4
    #[inline]
    pub fn temperature(&self, mass_fraction_h: f64, specific_gas_constant: f64) -> f64 {
        let mu_inv = mass_fraction_h * (self.q[uid::HII] + 1.0) + (1.0 - mass_fraction_h) * 0.25;
        (self.q[uid::PRE] / self.q[uid::DEN]) / mu_inv / specific_gas_constant
    }

    /// 坐标的简短描述
    pub fn print_coords(&self) -> String {
        format!("({:.6e}, {:.6e}, {:.6e})", self.xc.x, self.xc.y, self.xc.z)
    }

    /// 完整状态转储，用于致命错误诊断
    pub fn print_info(&self) -> String {
        format!(
            "cell @ {}\n  vol = {:.6e}\n  U    = {:?}\n  Q    = {:?}\n  UDOT = {:?}\n  gamma = {}",
            self.print_coords(),
            self.vol,
            self.u,
            self.q,
            self.udot,
            self.heat_capacity_ratio,
        )
    }
}

// ============================================================
// 测试
// ============================================================
