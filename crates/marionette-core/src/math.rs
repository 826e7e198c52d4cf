//! 数学基础类型
//!
//! 基于 nalgebra 的 2D 点/向量别名，所有运算使用 f64。

/// 2D 点
pub type Point2 = nalgebra::Point2<f64>;

/// 2D 向量
pub type Vector2 = nalgebra::Vector2<f64>;

/// 测试断言与拾取用的通用容差
///
/// 几何内核内部不做容差比较，退化情形由各操作的分支结构处理；
/// 调用方自带拾取半径，测试自带断言容差。
pub const EPSILON: f64 = 1e-9;
