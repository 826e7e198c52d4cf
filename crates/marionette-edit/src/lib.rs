//! Marionette 交互编辑
//!
//! 骨骼编辑与动画摆姿的状态机，不依赖任何窗口系统：编辑器只消费
//! 已投影到世界坐标的指针位置，直接修改核心模型。窗口、事件分发、
//! 绘制、相机与存盘由宿主应用负责。
//!
//! # 示例
//!
//! ```rust
//! use marionette_core::prelude::*;
//! use marionette_edit::prelude::*;
//!
//! let mut editor = SkeletonEditor::new(Skeleton::default(), EditConfig::default());
//!
//! // 在空白处按下并拖拽，长出一条新肢体
//! editor.press(Point2::new(2.0, 0.0));
//! editor.drag(Point2::new(3.0, 0.0));
//! editor.release();
//! assert_eq!(editor.skeleton().limbs().len(), 1);
//! ```

pub mod animation_editor;
pub mod config;
pub mod skeleton_editor;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::animation_editor::AnimationEditor;
    pub use crate::config::EditConfig;
    pub use crate::skeleton_editor::{PressOutcome, ReleaseOutcome, SkeletonEditor};
}
