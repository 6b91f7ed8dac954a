// crates/rh_physics/src/fluid.rs

//! 流体状态管理器
//!
//! 编排每个时间步内守恒状态的推进、有效性下限保护、全局表示
//! 同步和诊断归约。
//!
//! # 步进协议与表示新鲜度
//!
//! U/Q/W 三种表示共存，按调用方遵守的步进协议显式同步；
//! 数据结构本身不做强制。每步的循环为：
//!
//! ```text
//! 外部通量重构填 join.f → apply_interface_fluxes →
//! adv_solution (U 被改写) → fix_solution (U 被净化) →
//! global_q_from_u (Q 派生) → 分区边界交换 → 下一步
//! ```
//!
//! 各操作之后的权威表示：
//!
//! | 操作               | 权威表示 |
//! |--------------------|----------|
//! | `adv_solution`     | U        |
//! | `fix_solution`     | U        |
//! | `fix_primitives`   | Q        |
//! | `global_q_from_u`  | U（Q 为派生副本） |
//! | `global_u_from_q`  | Q（U 为派生副本） |
//!
//! 在同步之前读取 Q 得到的是陈旧数据，不报错——这是调用方契约。
//!
//! # 错误语义
//!
//! 下限违规（亚下限密度/压强/温度）按固定顺序就地修复，不算错误；
//! 非有限或精确为零的守恒量是不可恢复的数值崩溃，以
//! [`FluidError`] 上报，驱动循环必须终止本进程而不得重试——
//! 继续推进会把污染的通量传给邻进程。

use std::sync::Arc;

use rayon::prelude::*;
use thiserror::Error;

use rh_foundation::error::RhResult;
use rh_foundation::PhysicalConstants;

use crate::conversion::{q_from_u, u_from_q};
use crate::decomposition::{self, Ownership};
use crate::grid::{Grid, GridCell};
use crate::star::Star;
use crate::types::{uid, FluidParameters, GridParameters, StarParameters, Var};

// ============================================================
// 错误类型
// ============================================================

/// 不可恢复的流体状态错误
///
/// 携带肇事单元的完整状态转储；上层应原样传播至进程终止。
#[derive(Error, Debug)]
pub enum FluidError {
    /// 下限保护前守恒密度/能量已非有限
    #[error("数值崩溃: 单元{cell} @ {coords}: 密度={density:e}, 能量={energy:e}")]
    NonFinite {
        /// 单元序号
        cell: usize,
        /// 单元坐标
        coords: String,
        /// 守恒密度槽位值
        density: f64,
        /// 守恒能量槽位值
        energy: f64,
    },

    /// 下限保护后密度或能量精确为零
    #[error("下限保护后密度或能量为零: 单元{cell}\n{dump}")]
    ZeroedState {
        /// 单元序号
        cell: usize,
        /// 完整状态转储
        dump: String,
    },

    /// 写回后守恒状态含 NaN/Inf
    #[error("守恒状态含非有限值: 单元{cell} 槽位{slot}\n{dump}")]
    CorruptSlot {
        /// 单元序号
        cell: usize,
        /// 肇事槽位
        slot: usize,
        /// 完整状态转储
        dump: String,
    },
}

// ============================================================
// 流体状态管理器
// ============================================================

/// 流体状态管理器
///
/// 每进程创建一次，持有网格、点源与全局流体参数；每步被修改，
/// 进程收尾时销毁。
#[derive(Debug, Default)]
pub struct Fluid {
    consts: Arc<PhysicalConstants>,
    grid: Grid,
    star: Star,
    heat_capacity_ratio: f64,
    mass_fraction_h: f64,
}

impl Fluid {
    /// 绑定共享常数与流体参数
    ///
    /// 纯配置，不触碰网格。
    pub fn new(consts: Arc<PhysicalConstants>, params: FluidParameters) -> RhResult<Self> {
        consts.validate()?;
        params.validate()?;
        Ok(Self {
            consts,
            grid: Grid::default(),
            star: Star::default(),
            heat_capacity_ratio: params.heat_capacity_ratio,
            mass_fraction_h: params.mass_fraction_h,
        })
    }

    /// 构建网格并初始化点源
    ///
    /// 通过所有权判定决定点源归属（比较源位置首坐标与本进程网格
    /// 左右边界），用判定结果和本地格距初始化点源，并指派风注入
    /// 单元集。
    pub fn initialise_grid(&mut self, gp: GridParameters, sp: StarParameters) -> RhResult<()> {
        let grid = Grid::uniform(
            &gp,
            &self.consts,
            self.heat_capacity_ratio,
            sp.position,
            sp.wind_cell_radius,
        )?;

        let ownership = decomposition::classify(sp.position.x, grid.left_x(), grid.right_x());
        log::debug!(
            "点源所有权判定: {:?}, 风注入单元数: {}",
            ownership,
            grid.wind_cells().len()
        );

        let wind_cells = grid.wind_cells().to_vec();
        self.star
            .initialise(Arc::clone(&self.consts), sp, ownership, grid.dx());
        self.star.set_wind_cells(wind_cells);
        self.grid = grid;
        Ok(())
    }

    // ========== 时间推进 ==========

    /// 显式欧拉推进：`U += dt·UDOT`，随后清零 `UDOT`
    ///
    /// `UDOT` 必须已由外部通量重构阶段（经
    /// [`Grid::apply_interface_fluxes`]）填好。单元间无依赖，
    /// 按单元并行。
    pub fn adv_solution(&mut self, dt: f64) {
        self.grid.cells_mut().par_iter_mut().for_each(|cell| {
            for i in 0..uid::N {
                cell.u[i] += dt * cell.udot[i];
                cell.udot[i] = 0.0;
            }
        });
    }

    // ========== 有效性保护 ==========

    /// 对守恒状态施加物理有效性下限
    ///
    /// 修复顺序固定：密度下限 → 用下限前密度恢复速度 → 动能按
    /// 下限后密度重标 → 压强下限 → 温度下限反推压强。顺序不可
    /// 交换，否则动能重标与温度反推的结果不同。
    ///
    /// 非有限或精确为零的密度/能量是不可恢复的崩溃信号，直接
    /// 返回 [`FluidError`]，不做任何修复尝试。
    pub fn fix_solution(&mut self) -> Result<(), FluidError> {
        let consts = Arc::clone(&self.consts);
        let x_h = self.mass_fraction_h;
        self.grid
            .cells_mut()
            .par_iter_mut()
            .enumerate()
            .try_for_each(|(idx, cell)| Self::fix_cell(idx, cell, &consts, x_h))
    }

    fn fix_cell(
        idx: usize,
        cell: &mut GridCell,
        consts: &PhysicalConstants,
        x_h: f64,
    ) -> Result<(), FluidError> {
        if !cell.u[uid::DEN].is_finite() || !cell.u[uid::PRE].is_finite() {
            return Err(FluidError::NonFinite {
                cell: idx,
                coords: cell.print_coords(),
                density: cell.u[uid::DEN],
                energy: cell.u[uid::PRE],
            });
        }

        let nd = consts.nd;
        let gamma = cell.heat_capacity_ratio;

        let hii = (cell.u[uid::HII] / cell.u[uid::DEN]).clamp(0.0, 1.0);
        let den = cell.u[uid::DEN].max(consts.dfloor);

        // 速度与动能用下限前的密度恢复
        let mut v = [0.0; 3];
        let mut ke = 0.0;
        for dim in 0..nd {
            v[dim] = cell.u[uid::VEL + dim] / cell.u[uid::DEN];
            ke += v[dim] * v[dim];
        }
        ke *= 0.5 * cell.u[uid::DEN];

        let mut pre = (cell.u[uid::PRE] - ke) * (gamma - 1.0);
        // 动能重标到下限后的密度
        ke *= den / cell.u[uid::DEN];

        if pre < consts.pfloor {
            pre = consts.pfloor;
        }

        let mu_inv = x_h * (hii + 1.0) + (1.0 - x_h) * 0.25;
        let temperature = pre / (mu_inv * consts.specific_gas_constant * den);
        if temperature < consts.tfloor {
            pre = mu_inv * consts.specific_gas_constant * den * consts.tfloor;
        }

        cell.u[uid::DEN] = den;
        cell.u[uid::PRE] = pre / (gamma - 1.0) + ke;
        cell.u[uid::HII] = hii * den;
        for dim in 0..nd {
            cell.u[uid::VEL + dim] = den * v[dim];
        }

        if cell.u[uid::DEN] == 0.0 || cell.u[uid::PRE] == 0.0 {
            return Err(FluidError::ZeroedState {
                cell: idx,
                dump: cell.print_info(),
            });
        }
        for (slot, &value) in cell.u.iter().enumerate() {
            if !value.is_finite() {
                return Err(FluidError::CorruptSlot {
                    cell: idx,
                    slot,
                    dump: cell.print_info(),
                });
            }
        }
        Ok(())
    }

    /// 对原始状态施加下限（Q 为权威表示时的轻量版本）
    pub fn fix_primitives(&mut self) {
        let consts = Arc::clone(&self.consts);
        let x_h = self.mass_fraction_h;
        self.grid.cells_mut().par_iter_mut().for_each(|cell| {
            cell.q[uid::HII] = cell.q[uid::HII].clamp(0.0, 1.0);
            cell.q[uid::DEN] = cell.q[uid::DEN].max(consts.dfloor);
            cell.q[uid::PRE] = cell.q[uid::PRE].max(consts.pfloor);
            let mu_inv = x_h * (cell.q[uid::HII] + 1.0) + (1.0 - x_h) * 0.25;
            let temperature =
                cell.q[uid::PRE] / (mu_inv * consts.specific_gas_constant * cell.q[uid::DEN]);
            if temperature < consts.tfloor {
                cell.q[uid::PRE] =
                    mu_inv * consts.specific_gas_constant * cell.q[uid::DEN] * consts.tfloor;
            }
        });
    }

    // ========== 全局表示同步 ==========

    /// W ← U（二阶步进快照）
    pub fn global_w_from_u(&mut self) {
        self.grid
            .cells_mut()
            .par_iter_mut()
            .for_each(|cell| cell.w = cell.u);
    }

    /// U ← W（从快照恢复）
    pub fn global_u_from_w(&mut self) {
        self.grid
            .cells_mut()
            .par_iter_mut()
            .for_each(|cell| cell.u = cell.w);
    }

    /// Q ← U（按单元各自的 γ 与全局维数批量转换）
    pub fn global_q_from_u(&mut self) {
        let nd = self.consts.nd;
        self.grid
            .cells_mut()
            .par_iter_mut()
            .for_each(|cell| cell.q = q_from_u(&cell.u, cell.heat_capacity_ratio, nd));
    }

    /// U ← Q
    pub fn global_u_from_q(&mut self) {
        let nd = self.consts.nd;
        self.grid
            .cells_mut()
            .par_iter_mut()
            .for_each(|cell| cell.u = u_from_q(&cell.q, cell.heat_capacity_ratio, nd));
    }

    // ========== 诊断 ==========

    /// 由电离分数、压强、密度计算温度（纯诊断，不做下限）
    #[inline]
    pub fn calc_temperature(&self, hii: f64, pre: f64, den: f64) -> f64 {
        let mu_inv = self.mass_fraction_h * (hii + 1.0) + (1.0 - self.mass_fraction_h) * 0.25;
        (pre / den) / mu_inv / self.consts.specific_gas_constant
    }

    /// 声速 √(γp/ρ)
    #[inline]
    pub fn calc_sound_speed(gamma: f64, pre: f64, den: f64) -> f64 {
        (gamma * pre / den).sqrt()
    }

    /// 全场某变量的最大值（原始表示）
    ///
    /// 归约无条件从首个单元播种，全负值场也能取到正确结果；
    /// 空网格返回 0。
    pub fn max(&self, var: Var) -> f64 {
        let slot = var.slot();
        let mut iter = self.grid.cells().iter();
        let Some(first) = iter.next() else {
            return 0.0;
        };
        iter.fold(first.q[slot], |acc, cell| acc.max(cell.q[slot]))
    }

    /// 全场最高温度（原始表示）
    pub fn max_temperature(&self) -> f64 {
        self.grid.cells().iter().fold(f64::NEG_INFINITY, |acc, cell| {
            acc.max(self.calc_temperature(cell.q[uid::HII], cell.q[uid::PRE], cell.q[uid::DEN]))
        })
    }

    /// 全场最低温度（原始表示）
    pub fn min_temperature(&self) -> f64 {
        self.grid.cells().iter().fold(f64::INFINITY, |acc, cell| {
            acc.min(self.calc_temperature(cell.q[uid::HII], cell.q[uid::PRE], cell.q[uid::DEN]))
        })
    }

    // ========== 访问器 ==========

    /// 共享物理常数
    #[inline]
    pub fn constants(&self) -> &Arc<PhysicalConstants> {
        &self.consts
    }

    /// 网格
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// 可变网格
    #[inline]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// 点源
    #[inline]
    pub fn star(&self) -> &Star {
        &self.star
    }

    /// 可变点源
    #[inline]
    pub fn star_mut(&mut self) -> &mut Star {
        &mut self.star
    }

    /// 氢质量分数
    #[inline]
    pub fn mass_fraction_h(&self) -> f64 {
        self.mass_fraction_h
    }

    /// 全局绝热指数默认值
    #[inline]
    pub fn heat_capacity_ratio(&self) -> f64 {
        self.heat_capacity_ratio
    }

    /// 点源所有权（便捷转发）
    #[inline]
    pub fn star_ownership(&self) -> Option<Ownership> {
        self.star.ownership()
    }
}

// ============================================================
// 测试
// ============================================================
