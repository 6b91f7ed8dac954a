// crates/rh_foundation/src/index.rs

//! 类型安全索引系统
//!
//! 网格单元与界面存储在连续表中，相邻关系一律通过整数句柄表达，
//! 不持有引用。这样单元表可以整体搬迁/扩容，边界交换时句柄可以
//! 直接序列化。
//!
//! # 设计目标
//!
//! 1. **类型安全**: 通过标记类型在编译期区分单元索引与界面索引
//! 2. **零开销**: `Idx<Tag>` 与 `u32` 内存布局完全相同
//! 3. **无代际验证**: 网格的单元/界面表在网格生命周期内只增不删，
//!    不存在悬垂句柄问题，因此不携带代际号
//!
//! # 示例
//!
//! ```
//! use rh_foundation::index::{CellIndex, JoinIndex};
//!
//! let c = CellIndex::new(0);
//! assert!(c.is_valid());
//! assert_eq!(c.as_usize(), 0);
//!
//! let invalid = JoinIndex::INVALID;
//! assert!(invalid.is_invalid());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// 无效索引标记
pub const INVALID_INDEX: u32 = u32::MAX;

// ============================================================================
// 标记类型 (Phantom Types)
// ============================================================================

/// 单元索引标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellTag;

/// 界面索引标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JoinTag;

// ============================================================================
// 泛型索引类型
// ============================================================================

/// 轻量级类型安全索引（4字节）
///
/// 使用 Phantom Type `Tag` 区分不同类型的索引，避免误用。
///
/// # 内存表示
///
/// 与 `u32` 完全相同的内存布局，使用 `#[repr(transparent)]` 保证零开销。
/// 使用 `PhantomData<fn() -> Tag>` 确保自动实现 `Copy` 和 `Clone`。
#[derive(Serialize, Deserialize)]
#[repr(transparent)]
pub struct Idx<Tag> {
    /// 索引值
    index: u32,
    /// 类型标记
    #[serde(skip)]
    _marker: PhantomData<fn() -> Tag>,
}

impl<Tag> Copy for Idx<Tag> {}

impl<Tag> Clone for Idx<Tag> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<Tag> Idx<Tag> {
    /// 无效索引常量
    ///
    /// 用于表示未初始化的拓扑槽位（如边界侧无邻居）。
    pub const INVALID: Self = Self {
        index: INVALID_INDEX,
        _marker: PhantomData,
    };

    /// 创建新索引
    ///
    /// # Panics
    ///
    /// Debug模式下，若`index`为`u32::MAX`会触发panic（与INVALID冲突）。
    #[inline]
    pub const fn new(index: u32) -> Self {
        debug_assert!(index != INVALID_INDEX, "index cannot be u32::MAX (reserved for INVALID)");
        Self {
            index,
            _marker: PhantomData,
        }
    }

    /// 从`usize`创建索引
    #[inline]
    pub fn from_usize(index: usize) -> Self {
        Self::new(index as u32)
    }

    /// 获取原始索引值
    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// 转换为`usize`
    #[inline]
    pub const fn as_usize(self) -> usize {
        self.index as usize
    }

    /// 检查索引是否有效
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.index != INVALID_INDEX
    }

    /// 检查索引是否无效
    #[inline]
    pub const fn is_invalid(self) -> bool {
        self.index == INVALID_INDEX
    }

    /// 转换为 `Option<usize>`
    #[inline]
    pub fn to_option(self) -> Option<usize> {
        if self.is_valid() {
            Some(self.as_usize())
        } else {
            None
        }
    }
}

// ============================================================================
// Trait 实现
// ============================================================================

impl<Tag> Default for Idx<Tag> {
    #[inline]
    fn default() -> Self {
        Self::INVALID
    }
}

impl<Tag> PartialEq for Idx<Tag> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<Tag> Eq for Idx<Tag> {}

impl<Tag> PartialOrd for Idx<Tag> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<Tag> Ord for Idx<Tag> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index.cmp(&other.index)
    }
}

impl<Tag> Hash for Idx<Tag> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<Tag> fmt::Debug for Idx<Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "Idx({})", self.index)
        } else {
            write!(f, "Idx(INVALID)")
        }
    }
}

impl<Tag> fmt::Display for Idx<Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}", self.index)
        } else {
            write!(f, "INVALID")
        }
    }
}

impl<Tag> From<usize> for Idx<Tag> {
    #[inline]
    fn from(value: usize) -> Self {
        Self::from_usize(value)
    }
}

impl<Tag> From<u32> for Idx<Tag> {
    #[inline]
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl<Tag> From<Idx<Tag>> for usize {
    #[inline]
    fn from(idx: Idx<Tag>) -> Self {
        idx.as_usize()
    }
}

// ============================================================================
// 类型别名
// ============================================================================

/// 单元索引
pub type CellIndex = Idx<CellTag>;

/// 界面索引
pub type JoinIndex = Idx<JoinTag>;

// ============================================================================
// 便捷函数
// ============================================================================

/// 创建单元索引
#[inline]
pub const fn cell(index: u32) -> CellIndex {
    CellIndex::new(index)
}

/// 创建界面索引
#[inline]
pub const fn join(index: u32) -> JoinIndex {
    JoinIndex::new(index)
}

// ============================================================================
// 测试
// ============================================================================
