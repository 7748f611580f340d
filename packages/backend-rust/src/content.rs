//! Static learning content: modules, their multiple-choice activities, and
//! the badge table. Served read-only; learner state lives in the flat-file
//! store.

use std::sync::OnceLock;

use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDef {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub progress: u32,
    pub activities_completed: u32,
    pub total_activities: u32,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDef {
    pub id: &'static str,
    pub module_id: &'static str,
    pub title: &'static str,
    pub instruction: &'static str,
    pub question_number: u32,
    pub total_questions: u32,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub options: &'static [&'static str],
    pub correct_answer: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeDef {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub earned: bool,
}

pub fn modules() -> &'static [ModuleDef] {
    static MODULES: OnceLock<Vec<ModuleDef>> = OnceLock::new();
    MODULES.get_or_init(|| {
        vec![
            ModuleDef {
                id: "module-1",
                title: "Understanding Instructions",
                description: "Learn to follow and understand different types of instructions",
                icon: "📋",
                color: "primary",
                progress: 40,
                activities_completed: 4,
                total_activities: 10,
            },
            ModuleDef {
                id: "module-2",
                title: "Basic Numbers & Logic",
                description: "Practice counting, patterns, and simple problem solving",
                icon: "🔢",
                color: "success",
                progress: 20,
                activities_completed: 2,
                total_activities: 10,
            },
            ModuleDef {
                id: "module-3",
                title: "Focus & Routine Skills",
                description: "Build concentration and develop helpful daily routines",
                icon: "🎯",
                color: "accent",
                progress: 60,
                activities_completed: 6,
                total_activities: 10,
            },
        ]
    })
}

pub fn activities() -> &'static [ActivityDef] {
    static ACTIVITIES: OnceLock<Vec<ActivityDef>> = OnceLock::new();
    ACTIVITIES.get_or_init(|| {
        vec![
            ActivityDef {
                id: "activity-1-1",
                module_id: "module-1",
                title: "Match the Word",
                instruction: "Look at the picture and choose the word that matches",
                question_number: 1,
                total_questions: 5,
                kind: "multiple-choice",
                options: &["Apple", "Banana", "Orange", "Grape"],
                correct_answer: 0,
            },
            ActivityDef {
                id: "activity-1-2",
                module_id: "module-1",
                title: "Match the Word",
                instruction: "Look at the picture and choose the word that matches",
                question_number: 2,
                total_questions: 5,
                kind: "multiple-choice",
                options: &["Cat", "Dog", "Bird", "Fish"],
                correct_answer: 1,
            },
            ActivityDef {
                id: "activity-2-1",
                module_id: "module-2",
                title: "Count the Objects",
                instruction: "How many stars do you see?",
                question_number: 1,
                total_questions: 5,
                kind: "multiple-choice",
                options: &["3", "4", "5", "6"],
                correct_answer: 2,
            },
            ActivityDef {
                id: "activity-2-2",
                module_id: "module-2",
                title: "Complete the Pattern",
                instruction: "Which shape comes next in the pattern?",
                question_number: 2,
                total_questions: 5,
                kind: "multiple-choice",
                options: &["Circle", "Square", "Triangle", "Star"],
                correct_answer: 0,
            },
            ActivityDef {
                id: "activity-3-1",
                module_id: "module-3",
                title: "Daily Routine Order",
                instruction: "What do you do first in the morning?",
                question_number: 1,
                total_questions: 5,
                kind: "multiple-choice",
                options: &["Eat breakfast", "Wake up", "Go to school", "Brush teeth"],
                correct_answer: 1,
            },
            ActivityDef {
                id: "activity-3-2",
                module_id: "module-3",
                title: "Focus Challenge",
                instruction: "Find the item that is different",
                question_number: 2,
                total_questions: 5,
                kind: "multiple-choice",
                options: &["Red circle", "Red circle", "Blue circle", "Red circle"],
                correct_answer: 2,
            },
        ]
    })
}

pub fn badges() -> &'static [BadgeDef] {
    static BADGES: OnceLock<Vec<BadgeDef>> = OnceLock::new();
    BADGES.get_or_init(|| {
        vec![
            BadgeDef {
                id: "badge-1",
                title: "First Steps",
                description: "Complete your first activity",
                icon: "👟",
                earned: true,
            },
            BadgeDef {
                id: "badge-2",
                title: "Quick Learner",
                description: "Complete 5 activities in one day",
                icon: "⚡",
                earned: true,
            },
            BadgeDef {
                id: "badge-3",
                title: "Focus Master",
                description: "Complete all Focus & Routine activities",
                icon: "🎯",
                earned: false,
            },
            BadgeDef {
                id: "badge-4",
                title: "Number Ninja",
                description: "Get perfect score in Numbers & Logic",
                icon: "🥷",
                earned: false,
            },
            BadgeDef {
                id: "badge-5",
                title: "Instruction Expert",
                description: "Complete all Understanding Instructions activities",
                icon: "📚",
                earned: false,
            },
            BadgeDef {
                id: "badge-6",
                title: "Star Student",
                description: "Earn 50 stars",
                icon: "⭐",
                earned: false,
            },
        ]
    })
}

/// Three stars per completed activity, summed across modules.
pub fn compute_stars() -> u32 {
    modules()
        .iter()
        .map(|module| module.activities_completed * 3)
        .sum()
}

pub fn activities_for_module(module_id: &str) -> Vec<&'static ActivityDef> {
    activities()
        .iter()
        .filter(|activity| activity.module_id == module_id)
        .collect()
}

/// Sequential selection within a module: the first activity when `after` is
/// None, otherwise the one following it. None once the module is finished or
/// the anchor is unknown.
pub fn next_in_module(module_id: &str, after: Option<&str>) -> Option<&'static ActivityDef> {
    let in_module = activities_for_module(module_id);
    match after {
        None => in_module.first().copied(),
        Some(current_id) => {
            let index = in_module.iter().position(|a| a.id == current_id)?;
            in_module.get(index + 1).copied()
        }
    }
}
