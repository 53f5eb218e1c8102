use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程实体：由初始化种子写入，本系统的流程中不可变
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    pub id: i64,
    pub name: String,
}

// 带选中标记的课程：用于注册/资料编辑表单
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseSelection {
    pub id: i64,
    pub name: String,
    pub selected: bool,
}

impl CourseSelection {
    /// 将课程列表与已选集合合并为表单视图
    pub fn mark(courses: Vec<Course>, selected_ids: &std::collections::HashSet<i64>) -> Vec<Self> {
        courses
            .into_iter()
            .map(|course| CourseSelection {
                selected: selected_ids.contains(&course.id),
                id: course.id,
                name: course.name,
            })
            .collect()
    }
}
