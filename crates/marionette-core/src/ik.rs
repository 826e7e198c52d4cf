//! 解析逆运动学求解器
//!
//! 对 1~2 段的开链给出闭式解（Lander 的三角法，无迭代），把末端
//! 执行器拖向目标点。两段链的一般情形存在一对镜像解，按求解前的
//! 弯折方向选取同侧解，拖拽过程中肢体不会突然翻折。
//!
//! 闭链与其他顶点数的链原样保留，这是适用范围的边界而非错误。

use crate::geometry::Chain;
use crate::math::{Point2, Vector2};

/// 把链的末端执行器拖向目标点，就地改写内部顶点
///
/// 基点（首顶点）永不移动。不满足前置条件的链（闭链、顶点数不为
/// 2 或 3）不做任何修改。
pub fn solve(chain: &mut Chain, target: Point2) {
    if chain.is_closed() {
        return;
    }
    match chain.vertex_count() {
        2 => solve_one_segment(chain, target),
        3 => solve_two_segments(chain, target),
        _ => {}
    }
}

/// 单段链：线段绕基点自由旋转，长度不变
fn solve_one_segment(chain: &mut Chain, target: Point2) {
    let base = chain.vertex(0);
    if base == target {
        // 目标与基点重合时方向不存在
        return;
    }
    let reach = (chain.vertex(1) - base).norm();
    let u = target - base;
    let d = u.norm();
    chain.set_vertex(1, base + u * (reach / d));
}

/// 两段链：基点 v1、肘 v2、末端 v3
fn solve_two_segments(chain: &mut Chain, target: Point2) {
    let v1 = chain.vertex(0);
    let v2 = chain.vertex(1);
    let v3 = chain.vertex(2);
    let u = target - v1;
    let d = u.norm();
    let u1 = v2 - v1;
    let u2 = v3 - v2;
    let d1 = u1.norm();
    let d2 = u2.norm();

    // 零长度骨段退化为单段链
    if d1 == 0.0 {
        if d > 0.0 {
            chain.set_vertex(2, v1 + u * (d2 / d));
        }
        return;
    }
    if d2 == 0.0 {
        if d > 0.0 {
            let elbow = v1 + u * (d1 / d);
            chain.set_vertex(1, elbow);
            chain.set_vertex(2, elbow);
        }
        return;
    }

    if d == 0.0 {
        // 目标落在基点上：保持肘的方向，把末端沿既有骨段折回
        chain.set_vertex(2, v2 - u1 * (d2 / d1));
    } else if d >= d1 + d2 {
        // 超出最大可达距离：两段沿目标方向完全伸展
        let elbow = v1 + u * (d1 / d);
        chain.set_vertex(1, elbow);
        chain.set_vertex(2, elbow + u * (d2 / d));
    } else if d <= d1 - d2 {
        // 死区（近段较长）：完全折叠，末端朝基点折回
        let elbow = v1 + u * (d1 / d);
        chain.set_vertex(1, elbow);
        chain.set_vertex(2, elbow - u * (d2 / d));
    } else if d <= d2 - d1 {
        // 死区（远段较长）：肘折到基点背面，末端越过基点指向目标
        let elbow = v1 - u * (d1 / d);
        chain.set_vertex(1, elbow);
        chain.set_vertex(2, elbow + u * (d2 / d));
    } else {
        // 一般可达情形：余弦定理闭式解，末端精确落在目标上
        let a1 = u.y.atan2(u.x);
        let a2 = ((d * d + d1 * d1 - d2 * d2) / (2.0 * d1 * d))
            .clamp(-1.0, 1.0)
            .acos();

        // 按求解前的弯折方向选取镜像双解中的同侧解
        let a = if u1.perp(&u2) < 0.0 { a1 + a2 } else { a1 - a2 };

        chain.set_vertex(1, v1 + Vector2::new(a.cos(), a.sin()) * d1);
        chain.set_vertex(2, target);
    }
}
