// crates/rh_foundation/src/constants.rs

//! 共享物理常数
//!
//! `PhysicalConstants` 在每个计算进程启动时构造一次，经校验后以
//! `Arc` 共享给流体求解器、点源模型和边界条件等所有组件。
//! 构造之后不再修改。
//!
//! 数值下限 (`dfloor`/`pfloor`/`tfloor`) 属于求解器配置而非自然常数，
//! 但与气体常数一样在整个进程生命周期内保持不变，因此一并放在这里，
//! 避免在各组件间重复传递。

use serde::{Deserialize, Serialize};

use crate::error::{RhError, RhResult};

/// 共享物理常数
///
/// 包含理想气体常数、数值下限和空间维数。所有字段为 f64，
/// 单位采用 CGS（厘米-克-秒）制，与天体物理初始条件一致。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicalConstants {
    /// 密度下限 [g/cm³]
    pub dfloor: f64,
    /// 压强下限 [dyn/cm²]
    pub pfloor: f64,
    /// 温度下限 [K]
    pub tfloor: f64,
    /// 比气体常数 R/μ₀ [erg/(g·K)]
    pub specific_gas_constant: f64,
    /// 玻尔兹曼常数 [erg/K]
    pub boltzmann: f64,
    /// 氢原子质量 [g]
    pub hydrogen_mass: f64,
    /// 空间维数 (1-3)
    pub nd: usize,
}

impl Default for PhysicalConstants {
    /// 默认使用星际介质常数
    fn default() -> Self {
        Self::interstellar()
    }
}

impl PhysicalConstants {
    /// 星际介质常数（CGS 单位）
    ///
    /// 下限取电离区模拟的典型值：远低于弥散介质密度的密度下限、
    /// 对应的压强下限和 10 K 的温度下限。
    pub fn interstellar() -> Self {
        Self {
            dfloor: 1.0e-30,
            pfloor: 1.0e-22,
            tfloor: 10.0,
            specific_gas_constant: 8.3145e7,
            boltzmann: 1.380649e-16,
            hydrogen_mass: 1.6735575e-24,
            nd: 3,
        }
    }

    /// 无量纲常数（代码单位）
    ///
    /// 比气体常数取 1，下限取极小值。用于解析解对比和单元测试。
    pub fn scaled(nd: usize) -> Self {
        Self {
            dfloor: 1.0e-12,
            pfloor: 1.0e-12,
            tfloor: 1.0e-6,
            specific_gas_constant: 1.0,
            boltzmann: 1.0,
            hydrogen_mass: 1.0,
            nd,
        }
    }

    /// 验证常数有效性
    ///
    /// 检查下限为正、气体常数为正、维数在 1..=3。
    pub fn validate(&self) -> RhResult<()> {
        if self.dfloor <= 0.0 {
            return Err(RhError::validation("dfloor 必须为正"));
        }
        if self.pfloor <= 0.0 {
            return Err(RhError::validation("pfloor 必须为正"));
        }
        if self.tfloor <= 0.0 {
            return Err(RhError::validation("tfloor 必须为正"));
        }
        if self.specific_gas_constant <= 0.0 {
            return Err(RhError::validation("specific_gas_constant 必须为正"));
        }
        if self.nd < 1 || self.nd > 3 {
            return Err(RhError::out_of_range("nd", self.nd as f64, 1.0, 3.0));
        }
        Ok(())
    }
}

// ============================================================
// 测试
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interstellar_defaults() {
        let c = PhysicalConstants::default();
        assert_eq!(c.tfloor, 10.0);
        assert_eq!(c.nd, 3);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_scaled() {
        let c = PhysicalConstants::scaled(1);
        assert_eq!(c.specific_gas_constant, 1.0);
        assert_eq!(c.nd, 1);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_nd() {
        let mut c = PhysicalConstants::scaled(1);
        c.nd = 0;
        assert!(c.validate().is_err());
        c.nd = 4;
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nonpositive_floors() {
        let mut c = PhysicalConstants::scaled(2);
        c.dfloor = 0.0;
        assert!(c.validate().is_err());

        let mut c = PhysicalConstants::scaled(2);
        c.pfloor = -1.0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let c = PhysicalConstants::interstellar();
        let json = serde_json::to_string(&c).unwrap();
        let back: PhysicalConstants = serde_json::from_str(&json).unwrap();
        assert_eq!(back.dfloor, c.dfloor);
        assert_eq!(back.nd, c.nd);
    }
}
