// crates/rh_physics/src/decomposition.rs

//! 域分解与所有权判定
//!
//! 整个计算域沿第 0 轴切分为互不重叠、有序连续的区间，每个进程
//! （rank）负责一个区间。给定一个坐标与本进程的左右边界，判定
//! 该坐标归本进程、左邻还是右邻所有。
//!
//! 判定只依赖边界值本身；边界值必须与网格的
//! [`crate::grid::Grid::left_x`] / [`crate::grid::Grid::right_x`]
//! 一致——这一不变量由网格构造与分解配置共同维护，这里不重复推导。

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================
// 进程标识
// ============================================================

/// 处理进程（rank）标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RankId(pub u32);

impl fmt::Display for RankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rank{}", self.0)
    }
}

// ============================================================
// 所有权分类
// ============================================================

/// 坐标所有权分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ownership {
    /// 本进程区间内
    Here,
    /// 左邻进程
    Left,
    /// 右邻进程
    Right,
}

/// 判定坐标所有权
///
/// `xl ≤ x ≤ xr` 归本进程；`x < xl` 归左邻；`x > xr` 归右邻。
/// 两端均为闭边界：恰好落在共享边界上的坐标在两个相邻进程上
/// 都判为 Here，由调用方按进程顺序消歧。
#[inline]
pub fn classify(x: f64, xl: f64, xr: f64) -> Ownership {
    if x < xl {
        Ownership::Left
    } else if x > xr {
        Ownership::Right
    } else {
        Ownership::Here
    }
}

// ============================================================
// 进程区间
// ============================================================

/// 本进程负责的分解轴区间
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankBounds {
    /// 左边界坐标
    pub left_x: f64,
    /// 右边界坐标
    pub right_x: f64,
}

impl RankBounds {
    /// 构造区间
    pub fn new(left_x: f64, right_x: f64) -> Self {
        debug_assert!(left_x <= right_x);
        Self { left_x, right_x }
    }

    /// 判定坐标所有权
    #[inline]
    pub fn classify(&self, x: f64) -> Ownership {
        classify(x, self.left_x, self.right_x)
    }

    /// 坐标是否在区间内
    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        self.classify(x) == Ownership::Here
    }
}

// ============================================================
// 测试
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_basic() {
        assert_eq!(classify(5.0, 0.0, 10.0), Ownership::Here);
        assert_eq!(classify(-1.0, 0.0, 10.0), Ownership::Left);
        assert_eq!(classify(11.0, 0.0, 10.0), Ownership::Right);
    }

    #[test]
    fn test_classify_edges_inclusive() {
        assert_eq!(classify(0.0, 0.0, 10.0), Ownership::Here);
        assert_eq!(classify(10.0, 0.0, 10.0), Ownership::Here);
    }

    #[test]
    fn test_three_rank_partition() {
        // 三个进程 [0,10], [10,20], [20,30]，源在 x=15
        let ranks = [
            RankBounds::new(0.0, 10.0),
            RankBounds::new(10.0, 20.0),
            RankBounds::new(20.0, 30.0),
        ];
        assert_eq!(ranks[0].classify(15.0), Ownership::Right);
        assert_eq!(ranks[1].classify(15.0), Ownership::Here);
        assert_eq!(ranks[2].classify(15.0), Ownership::Left);
    }

    #[test]
    fn test_partition_totality() {
        // 连续无缝分解下任何坐标在恰好一个进程（内点）上判为 Here
        let ranks = [
            RankBounds::new(0.0, 10.0),
            RankBounds::new(10.0, 20.0),
            RankBounds::new(20.0, 30.0),
        ];
        for step in 0..=300 {
            let x = step as f64 / 10.0;
            let here_count = ranks.iter().filter(|r| r.contains(x)).count();
            // 共享边界点在两侧都判 Here，其余恰好一个
            if x == 10.0 || x == 20.0 {
                assert_eq!(here_count, 2);
            } else {
                assert_eq!(here_count, 1, "x={}", x);
            }
        }
    }

    #[test]
    fn test_neighbor_consistency() {
        // 一个进程判 Right 的坐标，其右邻必须判 Here 或更右
        let a = RankBounds::new(0.0, 10.0);
        let b = RankBounds::new(10.0, 20.0);
        for step in 0..200 {
            let x = step as f64 / 8.0;
            if a.classify(x) == Ownership::Right {
                assert_ne!(b.classify(x), Ownership::Left, "x={}", x);
            }
        }
    }

    #[test]
    fn test_rank_id_display() {
        assert_eq!(RankId(3).to_string(), "rank3");
    }
}
