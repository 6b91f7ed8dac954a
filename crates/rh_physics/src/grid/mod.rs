// crates/rh_physics/src/grid/mod.rs

//! 网格存储与拓扑
//!
//! 单元与界面保存在连续表（`Vec<GridCell>` / `Vec<GridJoin>`）中，
//! 以稳定整数句柄寻址。表在网格生命周期内只增不删，句柄可序列化、
//! 表可整体搬迁。
//!
//! 网格的几何构造在完整系统中由外部工厂负责；本模块携带一个
//! 均匀笛卡尔网格构造器，满足风注入单元指派与测试需要。
//! 构造出的左右边界与所有权判定 ([`crate::decomposition`])
//! 使用同一套坐标，这是两者共同维护的不变量。

pub mod cell;
pub mod join;

pub use cell::GridCell;
pub use join::GridJoin;

use glam::DVec3;

use rh_foundation::error::{RhError, RhResult};
use rh_foundation::index::{CellIndex, JoinIndex};
use rh_foundation::PhysicalConstants;

use crate::types::{uid, GridParameters};

// ============================================================
// 网格面
// ============================================================

/// 网格的一个外表面（轴 × 侧）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Face {
    /// 法向所在轴
    pub axis: usize,
    /// 哪一侧
    pub side: Side,
}

/// 面所在侧
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// 坐标小的一侧
    Left,
    /// 坐标大的一侧
    Right,
}

impl Face {
    /// 构造面
    pub const fn new(axis: usize, side: Side) -> Self {
        Self { axis, side }
    }
}

// ============================================================
// 网格
// ============================================================

/// 结构化网格
///
/// 持有本进程子域的全部单元与界面。
#[derive(Debug, Clone, Default)]
pub struct Grid {
    nd: usize,
    ncells: [usize; 3],
    dx: [f64; 3],
    left_x: f64,
    right_x: f64,
    cells: Vec<GridCell>,
    joins: Vec<GridJoin>,
    wind_cells: Vec<CellIndex>,
}

impl Grid {
    /// 构造均匀笛卡尔网格
    ///
    /// 建立单元几何、轴向邻接拓扑与内部界面，并根据星体位置和
    /// 风注入半径标记风注入单元集。
    ///
    /// # 参数
    /// - `params`: 子网格参数（单元数、左边界、格距）
    /// - `consts`: 共享物理常数（取 nd）
    /// - `gamma`: 单元绝热指数初值
    /// - `star_position`: 星体位置
    /// - `wind_cell_radius`: 风注入半径（单元数）
    pub fn uniform(
        params: &GridParameters,
        consts: &PhysicalConstants,
        gamma: f64,
        star_position: DVec3,
        wind_cell_radius: usize,
    ) -> RhResult<Self> {
        params.validate(consts.nd)?;
        if gamma <= 1.0 {
            return Err(RhError::out_of_range("gamma", gamma, 1.0, f64::INFINITY));
        }

        let nd = consts.nd;
        let [nx, ny, nz] = params.ncells;
        let dx = params.spacing;
        let n_cells = nx * ny * nz;

        let vol = dx.powi(nd as i32);
        let area = dx.powi(nd as i32 - 1);

        let id = |i: usize, j: usize, k: usize| CellIndex::from_usize(i + nx * (j + ny * k));

        let mut cells = Vec::with_capacity(n_cells);
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    let mut c = GridCell::new();
                    c.xc = DVec3::new(
                        params.left_x + (i as f64 + 0.5) * dx,
                        (j as f64 + 0.5) * dx,
                        (k as f64 + 0.5) * dx,
                    );
                    c.vol = vol;
                    c.heat_capacity_ratio = gamma;
                    cells.push(c);
                }
            }
        }
        // 按构造顺序回填：cells 的布局是 i 最快、k 最慢
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    let this = id(i, j, k);
                    let c = &mut cells[this.as_usize()];
                    if i > 0 {
                        c.left[0] = id(i - 1, j, k);
                    }
                    if i + 1 < nx {
                        c.right[0] = id(i + 1, j, k);
                    }
                    if j > 0 {
                        c.left[1] = id(i, j - 1, k);
                    }
                    if j + 1 < ny {
                        c.right[1] = id(i, j + 1, k);
                    }
                    if k > 0 {
                        c.left[2] = id(i, j, k - 1);
                    }
                    if k + 1 < nz {
                        c.right[2] = id(i, j, k + 1);
                    }
                }
            }
        }

        // 内部界面：每轴连接相邻单元对
        let mut joins = Vec::new();
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    let this = id(i, j, k);
                    for axis in 0..nd {
                        let right = cells[this.as_usize()].right[axis];
                        if right.is_invalid() {
                            continue;
                        }
                        let xj = 0.5 * (cells[this.as_usize()].xc + cells[right.as_usize()].xc);
                        let jid = JoinIndex::from_usize(joins.len());
                        joins.push(GridJoin::between(this, right, axis, xj, area));
                        cells[this.as_usize()].rjoin[axis] = jid;
                        cells[right.as_usize()].ljoin[axis] = jid;
                    }
                }
            }
        }

        // 风注入单元：中心到星体距离不超过 wind_cell_radius 个格距
        let wind_radius = wind_cell_radius as f64 * dx;
        let mut wind_cells = Vec::new();
        if wind_cell_radius > 0 {
            for (idx, c) in cells.iter().enumerate() {
                let mut r2 = 0.0;
                for axis in 0..nd {
                    let d = c.xc[axis] - star_position[axis];
                    r2 += d * d;
                }
                if r2.sqrt() <= wind_radius {
                    wind_cells.push(CellIndex::from_usize(idx));
                }
            }
        }

        Ok(Self {
            nd,
            ncells: params.ncells,
            dx: [dx; 3],
            left_x: params.left_x,
            right_x: params.right_x(),
            cells,
            joins,
            wind_cells,
        })
    }

    // ========== 访问器 ==========

    /// 空间维数
    #[inline]
    pub fn nd(&self) -> usize {
        self.nd
    }

    /// 各轴单元数
    #[inline]
    pub fn ncells(&self) -> [usize; 3] {
        self.ncells
    }

    /// 各轴格距
    #[inline]
    pub fn dx(&self) -> [f64; 3] {
        self.dx
    }

    /// 分解轴左边界坐标
    #[inline]
    pub fn left_x(&self) -> f64 {
        self.left_x
    }

    /// 分解轴右边界坐标
    #[inline]
    pub fn right_x(&self) -> f64 {
        self.right_x
    }

    /// 单元总数
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.cells.len()
    }

    /// 单元表
    #[inline]
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// 可变单元表
    #[inline]
    pub fn cells_mut(&mut self) -> &mut [GridCell] {
        &mut self.cells
    }

    /// 按句柄取单元
    #[inline]
    pub fn cell(&self, idx: CellIndex) -> &GridCell {
        &self.cells[idx.as_usize()]
    }

    /// 按句柄取可变单元
    #[inline]
    pub fn cell_mut(&mut self, idx: CellIndex) -> &mut GridCell {
        &mut self.cells[idx.as_usize()]
    }

    /// 界面表
    #[inline]
    pub fn joins(&self) -> &[GridJoin] {
        &self.joins
    }

    /// 可变界面表
    #[inline]
    pub fn joins_mut(&mut self) -> &mut [GridJoin] {
        &mut self.joins
    }

    /// 按句柄取界面
    #[inline]
    pub fn join(&self, idx: JoinIndex) -> &GridJoin {
        &self.joins[idx.as_usize()]
    }

    /// 风注入单元集
    #[inline]
    pub fn wind_cells(&self) -> &[CellIndex] {
        &self.wind_cells
    }

    // ========== 通量散布 ==========

    /// 将界面通量散布到两侧单元的累加器
    ///
    /// 对每个界面：`rcell.udot += F·A/V`，`lcell.udot -= F·A/V`。
    /// 边界界面只更新有单元的一侧。外部通量重构阶段填好 `f`
    /// 之后、[`crate::fluid::Fluid::adv_solution`] 之前调用。
    pub fn apply_interface_fluxes(&mut self) {
        for jidx in 0..self.joins.len() {
            let (lcell, rcell, f, area) = {
                let j = &self.joins[jidx];
                (j.lcell, j.rcell, j.f, j.area)
            };
            if rcell.is_valid() {
                let c = &mut self.cells[rcell.as_usize()];
                let w = area / c.vol;
                for i in 0..uid::N {
                    c.udot[i] += f[i] * w;
                }
            }
            if lcell.is_valid() {
                let c = &mut self.cells[lcell.as_usize()];
                let w = area / c.vol;
                for i in 0..uid::N {
                    c.udot[i] -= f[i] * w;
                }
            }
        }
    }

    // ========== 边界层提取 ==========

    /// 提取某面的边界层单元句柄（按面内行优先顺序）
    pub fn boundary_layer(&self, face: Face) -> Vec<CellIndex> {
        let [nx, ny, nz] = self.ncells;
        let id = |i: usize, j: usize, k: usize| CellIndex::from_usize(i + nx * (j + ny * k));
        let mut layer = Vec::new();
        match face.axis {
            0 => {
                let i = if face.side == Side::Left { 0 } else { nx - 1 };
                for k in 0..nz {
                    for j in 0..ny {
                        layer.push(id(i, j, k));
                    }
                }
            }
            1 => {
                let j = if face.side == Side::Left { 0 } else { ny - 1 };
                for k in 0..nz {
                    for i in 0..nx {
                        layer.push(id(i, j, k));
                    }
                }
            }
            _ => {
                let k = if face.side == Side::Left { 0 } else { nz - 1 };
                for j in 0..ny {
                    for i in 0..nx {
                        layer.push(id(i, j, k));
                    }
                }
            }
        }
        layer
    }

    /// 提取某面边界层单元的守恒状态（发送给邻进程用）
    pub fn boundary_layer_u(&self, face: Face) -> Vec<crate::types::FluidArray> {
        self.boundary_layer(face)
            .into_iter()
            .map(|idx| self.cell(idx).u)
            .collect()
    }
}

// ============================================================
// 测试
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GridParameters;

    fn grid_1d(n: usize) -> Grid {
        let params = GridParameters {
            ncells: [n, 1, 1],
            left_x: 0.0,
            spacing: 1.0,
        };
        let consts = PhysicalConstants::scaled(1);
        Grid::uniform(&params, &consts, 5.0 / 3.0, DVec3::ZERO, 0).unwrap()
    }

    #[test]
    fn test_uniform_1d_topology() {
        let grid = grid_1d(4);
        assert_eq!(grid.n_cells(), 4);
        assert_eq!(grid.joins().len(), 3);

        let c0 = &grid.cells()[0];
        assert!(c0.left[0].is_invalid());
        assert_eq!(c0.right[0].as_usize(), 1);
        assert!(c0.ljoin[0].is_invalid());
        assert!(c0.rjoin[0].is_valid());

        let c3 = &grid.cells()[3];
        assert_eq!(c3.left[0].as_usize(), 2);
        assert!(c3.right[0].is_invalid());
    }

    #[test]
    fn test_uniform_1d_geometry() {
        let grid = grid_1d(4);
        assert_eq!(grid.left_x(), 0.0);
        assert_eq!(grid.right_x(), 4.0);
        assert!((grid.cells()[0].xc.x - 0.5).abs() < 1e-14);
        assert!((grid.cells()[3].xc.x - 3.5).abs() < 1e-14);
        assert_eq!(grid.cells()[0].vol, 1.0);
    }

    #[test]
    fn test_join_shared_between_cells() {
        let grid = grid_1d(3);
        let c0 = &grid.cells()[0];
        let c1 = &grid.cells()[1];
        assert_eq!(c0.rjoin[0], c1.ljoin[0]);

        let j = grid.join(c0.rjoin[0]);
        assert_eq!(j.lcell.as_usize(), 0);
        assert_eq!(j.rcell.as_usize(), 1);
        assert_eq!(j.axis, 0);
    }

    #[test]
    fn test_uniform_2d_counts() {
        let params = GridParameters {
            ncells: [3, 2, 1],
            left_x: 0.0,
            spacing: 0.5,
        };
        let consts = PhysicalConstants::scaled(2);
        let grid = Grid::uniform(&params, &consts, 1.4, DVec3::ZERO, 0).unwrap();

        assert_eq!(grid.n_cells(), 6);
        // x向界面: 2*2=4, y向界面: 3*1=3
        assert_eq!(grid.joins().len(), 7);
        assert!((grid.cells()[0].vol - 0.25).abs() < 1e-14);
    }

    #[test]
    fn test_wind_cells_around_star() {
        let params = GridParameters {
            ncells: [8, 1, 1],
            left_x: 0.0,
            spacing: 1.0,
        };
        let consts = PhysicalConstants::scaled(1);
        let star = DVec3::new(4.0, 0.0, 0.0);
        let grid = Grid::uniform(&params, &consts, 5.0 / 3.0, star, 2).unwrap();

        // 中心在 3.5 和 4.5 的单元距星体 0.5，2.5/5.5 距 1.5
        let winds: Vec<usize> = grid.wind_cells().iter().map(|c| c.as_usize()).collect();
        assert_eq!(winds, vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_apply_interface_fluxes_sign_convention() {
        let mut grid = grid_1d(2);
        let jid = grid.cells()[0].rjoin[0];
        grid.joins_mut()[jid.as_usize()].f[uid::DEN] = 2.0;

        grid.apply_interface_fluxes();

        // 左减右加，单位面积/体积
        assert!((grid.cells()[0].udot[uid::DEN] + 2.0).abs() < 1e-14);
        assert!((grid.cells()[1].udot[uid::DEN] - 2.0).abs() < 1e-14);
    }

    #[test]
    fn test_boundary_layer_extraction() {
        let params = GridParameters {
            ncells: [3, 2, 1],
            left_x: 0.0,
            spacing: 1.0,
        };
        let consts = PhysicalConstants::scaled(2);
        let grid = Grid::uniform(&params, &consts, 1.4, DVec3::ZERO, 0).unwrap();

        let left = grid.boundary_layer(Face::new(0, Side::Left));
        assert_eq!(left.iter().map(|c| c.as_usize()).collect::<Vec<_>>(), vec![0, 3]);

        let right = grid.boundary_layer(Face::new(0, Side::Right));
        assert_eq!(right.iter().map(|c| c.as_usize()).collect::<Vec<_>>(), vec![2, 5]);

        let bottom = grid.boundary_layer(Face::new(1, Side::Left));
        assert_eq!(bottom.iter().map(|c| c.as_usize()).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_uniform_rejects_bad_gamma() {
        let params = GridParameters::default();
        let consts = PhysicalConstants::scaled(1);
        assert!(Grid::uniform(&params, &consts, 1.0, DVec3::ZERO, 0).is_err());
    }
}
