//! Test utilities for pipeline tests.
//!
//! This module provides a scripted mock driver and fixtures.

#![allow(dead_code)]

pub mod mock_driver;

#[allow(unused_imports)]
pub use mock_driver::{MockDriver, MockResponse, MockStages, RecordedCall};

use animatic_core::{Character, PlotPoint, ScriptDesign, Shot, Storyboard};

/// Script design for the lighthouse story.
pub fn lighthouse_script() -> ScriptDesign {
    ScriptDesign {
        characters: vec![Character::new("灯塔看守人", "孤独而坚守", "旧雨衣, 花白胡子")],
        plot_points: vec![
            PlotPoint::new("守夜", "看守人在暴风雨夜点亮灯塔"),
            PlotPoint::new("漂流瓶", "清晨他在海边发现一个漂流瓶"),
        ],
    }
}

/// Two-shot storyboard; `tag` is woven into the visual fields to tell rounds apart.
pub fn lighthouse_storyboard(tag: &str) -> Storyboard {
    Storyboard::new(vec![
        Shot {
            shot_id: "1".to_string(),
            plot_title: "守夜".to_string(),
            scene_elements: format!("{tag}暴风雨中的灯塔"),
            actions: "灯光扫过海面".to_string(),
            bgm_description: "低沉弦乐".to_string(),
            sound_effect: "雷声".to_string(),
            duration: "5秒".to_string(),
        },
        Shot {
            shot_id: "2".to_string(),
            plot_title: "漂流瓶".to_string(),
            scene_elements: format!("{tag}清晨的沙滩"),
            actions: "看守人弯腰拾起漂流瓶".to_string(),
            bgm_description: "钢琴".to_string(),
            sound_effect: "海浪".to_string(),
            duration: "4秒".to_string(),
        },
    ])
}

/// Serialize a value as a fenced JSON reply, the way models usually answer.
pub fn fenced_json<T: serde::Serialize>(value: &T) -> String {
    format!(
        "好的，结果如下：\n```json\n{}\n```",
        serde_json::to_string_pretty(value).expect("fixture serializes")
    )
}
