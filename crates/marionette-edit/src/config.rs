//! 编辑交互配置

use serde::{Deserialize, Serialize};

/// 编辑交互配置
///
/// 容差均为世界单位；宿主负责把屏幕像素半径按相机缩放换算后填入。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditConfig {
    /// 拾取容差
    pub pick_tolerance: f64,
    /// 释放时的顶点合并容差
    pub merge_tolerance: f64,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            pick_tolerance: 0.1,
            merge_tolerance: 0.2, // 合并半径取拾取半径的两倍
        }
    }
}
