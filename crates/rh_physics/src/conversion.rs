// crates/rh_physics/src/conversion.rs

//! 守恒/原始/通量表示转换
//!
//! 纯函数，无状态：给定局部绝热指数 γ>1 与空间维数 nd∈{1,2,3}，
//! 在三种表示之间精确转换。`u_from_q` 与 `q_from_u` 在同一 (γ, nd)
//! 下互为精确逆（浮点容差内），这是测试套件固定的性质。
//!
//! # 转换关系
//!
//! ```text
//! 动量   = 密度 × 速度            （逐轴）
//! 总能   = 压强/(γ−1) + 动能
//! 示踪   = 电离分数 × 密度
//! ```
//!
//! 通量版本另取输运轴 `dim`，给出该轴的标准有限体积通量向量。
//! 超出 nd 的分量槽位在状态转换中原样保留，在通量中置零。

use crate::types::{uid, FluidArray};

/// 原始 → 守恒
///
/// # 参数
/// - `q`: 原始状态（密度、速度、压强、电离分数）
/// - `gamma`: 局部绝热指数
/// - `nd`: 空间维数
#[inline]
pub fn u_from_q(q: &FluidArray, gamma: f64, nd: usize) -> FluidArray {
    let mut u = *q;
    let den = q[uid::DEN];

    let mut ke = 0.0;
    for dim in 0..nd {
        let v = q[uid::VEL + dim];
        u[uid::VEL + dim] = den * v;
        ke += v * v;
    }
    ke *= 0.5 * den;

    u[uid::PRE] = q[uid::PRE] / (gamma - 1.0) + ke;
    u[uid::HII] = q[uid::HII] * den;
    u
}

/// 守恒 → 原始
///
/// 上述转换的逆：速度 = 动量/密度，压强 = (γ−1)×(总能 − 动能)，
/// 电离分数 = 示踪/密度。
#[inline]
pub fn q_from_u(u: &FluidArray, gamma: f64, nd: usize) -> FluidArray {
    let mut q = *u;
    let den = u[uid::DEN];

    let mut ke = 0.0;
    for dim in 0..nd {
        let v = u[uid::VEL + dim] / den;
        q[uid::VEL + dim] = v;
        ke += v * v;
    }
    ke *= 0.5 * den;

    q[uid::PRE] = (u[uid::PRE] - ke) * (gamma - 1.0);
    q[uid::HII] = u[uid::HII] / den;
    q
}

/// 原始状态 → `dim` 轴通量
///
/// 标准有限体积通量：
/// - 密度通量 = ρ·v_dim
/// - 动量通量 = ρ·v_i·v_dim，同轴另加压强项
/// - 能量通量 = v_dim·(E + p)
/// - 示踪通量 = ρ·x_HII·v_dim
#[inline]
pub fn f_from_q(q: &FluidArray, gamma: f64, nd: usize, dim: usize) -> FluidArray {
    debug_assert!(dim < nd);
    let mut f = [0.0; uid::N];
    let den = q[uid::DEN];
    let pre = q[uid::PRE];
    let vd = q[uid::VEL + dim];

    let mut ke = 0.0;
    for d in 0..nd {
        let v = q[uid::VEL + d];
        f[uid::VEL + d] = den * v * vd;
        ke += v * v;
    }
    ke *= 0.5 * den;
    f[uid::VEL + dim] += pre;

    let energy = pre / (gamma - 1.0) + ke;
    f[uid::DEN] = den * vd;
    f[uid::PRE] = vd * (energy + pre);
    f[uid::HII] = q[uid::HII] * den * vd;
    f
}

/// 守恒状态 → `dim` 轴通量
///
/// 与 [`f_from_q`] 给出相同的通量向量，直接从守恒量计算。
#[inline]
pub fn f_from_u(u: &FluidArray, gamma: f64, nd: usize, dim: usize) -> FluidArray {
    debug_assert!(dim < nd);
    let mut f = [0.0; uid::N];
    let den = u[uid::DEN];
    let vd = u[uid::VEL + dim] / den;

    let mut ke = 0.0;
    for d in 0..nd {
        let v = u[uid::VEL + d] / den;
        f[uid::VEL + d] = u[uid::VEL + d] * vd;
        ke += v * v;
    }
    ke *= 0.5 * den;

    let pre = (u[uid::PRE] - ke) * (gamma - 1.0);
    f[uid::VEL + dim] += pre;

    f[uid::DEN] = u[uid::VEL + dim];
    f[uid::PRE] = vd * (u[uid::PRE] + pre);
    f[uid::HII] = u[uid::HII] * vd;
    f
}

// ============================================================
// 测试
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    const GAMMA: f64 = 5.0 / 3.0;

    fn sample_q() -> FluidArray {
        let mut q = [0.0; uid::N];
        q[uid::DEN] = 2.0;
        q[uid::PRE] = 3.0;
        q[uid::HII] = 0.25;
        q[uid::VEL] = 1.5;
        q[uid::VEL + 1] = -0.5;
        q[uid::VEL + 2] = 0.75;
        q
    }

    #[test]
    fn test_u_from_q_static_cell() {
        // 静止单元：γ=5/3，ρ=1, v=0, p=1, x=0.5
        let mut q = [0.0; uid::N];
        q[uid::DEN] = 1.0;
        q[uid::PRE] = 1.0;
        q[uid::HII] = 0.5;

        let u = u_from_q(&q, GAMMA, 1);
        assert!((u[uid::PRE] - 1.5).abs() < 1e-14); // 1/(2/3) + 0
        assert!((u[uid::HII] - 0.5).abs() < 1e-14);
        assert_eq!(u[uid::VEL], 0.0);
    }

    #[test]
    fn test_roundtrip_all_dims() {
        let q = sample_q();
        for nd in 1..=3 {
            let u = u_from_q(&q, GAMMA, nd);
            let q2 = q_from_u(&u, GAMMA, nd);
            for i in 0..uid::N {
                assert!(
                    (q2[i] - q[i]).abs() < 1e-12,
                    "nd={} slot={} q={} q2={}",
                    nd,
                    i,
                    q[i],
                    q2[i]
                );
            }
        }
    }

    #[test]
    fn test_roundtrip_various_gamma() {
        let q = sample_q();
        for gamma in [1.1, 1.4, 5.0 / 3.0, 2.0] {
            let u = u_from_q(&q, gamma, 3);
            let q2 = q_from_u(&u, gamma, 3);
            for i in 0..uid::N {
                assert!((q2[i] - q[i]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_unused_slots_preserved() {
        // nd=1 时第1、2分量槽位原样穿过转换
        let mut q = sample_q();
        q[uid::VEL + 1] = 7.0;
        q[uid::VEL + 2] = -9.0;

        let u = u_from_q(&q, GAMMA, 1);
        assert_eq!(u[uid::VEL + 1], 7.0);
        assert_eq!(u[uid::VEL + 2], -9.0);

        let q2 = q_from_u(&u, GAMMA, 1);
        assert_eq!(q2[uid::VEL + 1], 7.0);
        assert_eq!(q2[uid::VEL + 2], -9.0);
    }

    #[test]
    fn test_flux_on_axis_momentum_has_pressure() {
        let q = sample_q();
        let f = f_from_q(&q, GAMMA, 3, 0);

        let den = q[uid::DEN];
        let vd = q[uid::VEL];
        assert!((f[uid::DEN] - den * vd).abs() < 1e-14);
        // 同轴动量通量: ρ v₀² + p
        assert!((f[uid::VEL] - (den * vd * vd + q[uid::PRE])).abs() < 1e-14);
        // 异轴动量通量: ρ v₁ v₀
        assert!((f[uid::VEL + 1] - den * q[uid::VEL + 1] * vd).abs() < 1e-14);
        // 示踪通量: ρ x v₀
        assert!((f[uid::HII] - den * q[uid::HII] * vd).abs() < 1e-14);
    }

    #[test]
    fn test_flux_energy_component() {
        let q = sample_q();
        let f = f_from_q(&q, GAMMA, 2, 1);

        let den = q[uid::DEN];
        let ke = 0.5 * den * (q[uid::VEL] * q[uid::VEL] + q[uid::VEL + 1] * q[uid::VEL + 1]);
        let energy = q[uid::PRE] / (GAMMA - 1.0) + ke;
        let expected = q[uid::VEL + 1] * (energy + q[uid::PRE]);
        assert!((f[uid::PRE] - expected).abs() < 1e-13);
    }

    #[test]
    fn test_flux_from_u_matches_flux_from_q() {
        let q = sample_q();
        for nd in 1..=3 {
            let u = u_from_q(&q, GAMMA, nd);
            for dim in 0..nd {
                let fq = f_from_q(&q, GAMMA, nd, dim);
                let fu = f_from_u(&u, GAMMA, nd, dim);
                for i in 0..uid::N {
                    assert!(
                        (fq[i] - fu[i]).abs() < 1e-12,
                        "nd={} dim={} slot={}",
                        nd,
                        dim,
                        i
                    );
                }
            }
        }
    }

    #[test]
    fn test_flux_static_state_is_pressure_only() {
        // 静止气体：仅同轴动量槽位携带压强，其余通量为零
        let mut q = [0.0; uid::N];
        q[uid::DEN] = 1.0;
        q[uid::PRE] = 2.5;
        q[uid::HII] = 0.3;

        let f = f_from_q(&q, GAMMA, 3, 1);
        assert_eq!(f[uid::DEN], 0.0);
        assert_eq!(f[uid::PRE], 0.0);
        assert_eq!(f[uid::HII], 0.0);
        assert_eq!(f[uid::VEL], 0.0);
        assert!((f[uid::VEL + 1] - 2.5).abs() < 1e-14);
        assert_eq!(f[uid::VEL + 2], 0.0);
    }
}
