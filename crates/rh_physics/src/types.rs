// crates/rh_physics/src/types.rs

//! 求解器核心类型定义
//!
//! 本模块提供流体求解所需的类型系统，包括：
//! - **变量布局**：`FluidArray` 定长数组与 `uid` 槽位常量
//! - **变量枚举**：`Var`，用于诊断归约时选取变量
//! - **参数结构**：`FluidParameters` / `GridParameters` / `StarParameters`
//!   作为运行时配置接口（全 f64，serde 可序列化）
//!
//! # 变量布局
//!
//! 守恒状态 U、原始状态 Q、快照 W 与通量 F 共用同一布局：
//!
//! ```text
//! 槽位      U (守恒)          Q (原始)
//! DEN       密度              密度
//! PRE       总能密度          压强
//! HII       电离质量示踪      电离分数
//! VEL+dim   动量分量          速度分量   (dim ∈ 0..nd)
//! ```

use glam::DVec3;
use serde::{Deserialize, Serialize};

use rh_foundation::error::{RhError, RhResult};

// ============================================================
// 变量布局
// ============================================================

/// 变量槽位常量
///
/// `VEL + dim` 寻址第 dim 个动量/速度分量，预留 3 个分量槽位；
/// 超出 `nd` 的分量槽位不参与计算，原样保留。
pub mod uid {
    /// 密度槽位
    pub const DEN: usize = 0;
    /// 能量/压强槽位
    pub const PRE: usize = 1;
    /// 电离示踪/分数槽位
    pub const HII: usize = 2;
    /// 动量/速度首分量槽位
    pub const VEL: usize = 3;
    /// 总槽位数
    pub const N: usize = VEL + 3;
}

/// 定长变量数组，U/Q/W/F 共用
pub type FluidArray = [f64; uid::N];

/// 物理变量标识
///
/// 用于诊断归约（如 [`crate::fluid::Fluid::max`]）时选取变量。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Var {
    /// 密度
    Density,
    /// 能量（守恒）/ 压强（原始）
    Pressure,
    /// 电离示踪（守恒）/ 电离分数（原始）
    IonFraction,
    /// 第 dim 个动量/速度分量
    Velocity(usize),
}

impl Var {
    /// 对应的数组槽位
    #[inline]
    pub fn slot(self) -> usize {
        match self {
            Var::Density => uid::DEN,
            Var::Pressure => uid::PRE,
            Var::IonFraction => uid::HII,
            Var::Velocity(dim) => {
                debug_assert!(dim < 3);
                uid::VEL + dim
            }
        }
    }
}

// ============================================================
// 参数结构（运行时配置，全 f64）
// ============================================================

/// 流体全局参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FluidParameters {
    /// 比热比（绝热指数）γ，默认值，单元可各自覆盖
    pub heat_capacity_ratio: f64,
    /// 氢质量分数 X
    pub mass_fraction_h: f64,
}

impl Default for FluidParameters {
    fn default() -> Self {
        Self {
            heat_capacity_ratio: 5.0 / 3.0,
            mass_fraction_h: 1.0,
        }
    }
}

impl FluidParameters {
    /// 验证参数有效性
    pub fn validate(&self) -> RhResult<()> {
        if self.heat_capacity_ratio <= 1.0 {
            return Err(RhError::out_of_range(
                "heat_capacity_ratio",
                self.heat_capacity_ratio,
                1.0,
                f64::INFINITY,
            ));
        }
        RhError::check_range("mass_fraction_h", self.mass_fraction_h, 0.0, 1.0)
    }
}

/// 网格参数
///
/// 描述本进程负责的子网格：各轴单元数、分解轴左边界和均匀格距。
/// 右边界由 `left_x + ncells[0] * spacing` 导出，与所有权判定
/// 使用同一套边界值。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridParameters {
    /// 各轴单元数（未用轴填 1）
    pub ncells: [usize; 3],
    /// 分解轴（第 0 轴）左边界坐标
    pub left_x: f64,
    /// 均匀格距（各轴相同）
    pub spacing: f64,
}

impl Default for GridParameters {
    fn default() -> Self {
        Self {
            ncells: [1, 1, 1],
            left_x: 0.0,
            spacing: 1.0,
        }
    }
}

impl GridParameters {
    /// 分解轴右边界坐标
    #[inline]
    pub fn right_x(&self) -> f64 {
        self.left_x + self.ncells[0] as f64 * self.spacing
    }

    /// 验证参数有效性
    pub fn validate(&self, nd: usize) -> RhResult<()> {
        if self.spacing <= 0.0 {
            return Err(RhError::validation("spacing 必须为正"));
        }
        for (axis, &n) in self.ncells.iter().enumerate() {
            if axis < nd && n == 0 {
                return Err(RhError::validation(format!("第{}轴单元数不能为0", axis)));
            }
            if axis >= nd && n != 1 {
                return Err(RhError::validation(format!("未用轴{}单元数必须为1", axis)));
            }
        }
        Ok(())
    }
}

/// 点源（星体）参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarParameters {
    /// 星体位置
    pub position: DVec3,
    /// 风注入半径（以格距为单位的单元数）
    pub wind_cell_radius: usize,
}

impl Default for StarParameters {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            wind_cell_radius: 0,
        }
    }
}

// ============================================================
// 测试
// ============================================================
