//! Marionette 核心引擎
//!
//! 2D 骨骼动画工具的算法核心，提供：
//! - 平面几何内核（链/多边形：边、有向面积、环绕方向、包含测试、可达半径）
//! - 1~2 段开链的解析逆运动学求解（闭式解，保持弯折方向）
//! - 骨骼模型（闭合躯干 + 开链肢体）与姿态/动画数据
//! - 顶点与边的拾取查询
//!
//! 全部为单线程的纯函数与就地修改，不含窗口、绘制与持久化 I/O。
//!
//! # 示例
//!
//! ```rust
//! use marionette_core::prelude::*;
//!
//! // 两段肢体，把末端拖向目标
//! let mut limb = Chain::new(
//!     vec![
//!         Point2::new(0.0, 0.0),
//!         Point2::new(1.0, 0.0),
//!         Point2::new(2.0, 0.0),
//!     ],
//!     false,
//! )
//! .unwrap();
//! ik::solve(&mut limb, Point2::new(0.0, 1.5));
//! assert!((limb.end_point() - Point2::new(0.0, 1.5)).norm() < 1e-9);
//! ```

pub mod geometry;
pub mod ik;
pub mod math;
pub mod pick;
pub mod pose;
pub mod skeleton;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::geometry::{Chain, GeometryError, Segment};
    pub use crate::ik;
    pub use crate::math::{Point2, Vector2, EPSILON};
    pub use crate::pick::{PickConfig, PickEngine, PickHit};
    pub use crate::pose::{Animation, AnimationError, Pose};
    pub use crate::skeleton::{
        DeleteOutcome, EdgeId, PolygonId, Skeleton, SkeletonError, VertexId,
    };
}
