pub mod create;
pub mod dashboard;
pub mod detail;
pub mod profile;
pub mod roster;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::students::requests::{
    CreateStudentRequest, UpdateStudentProfileRequest, UpdateStudentRequest,
};
use crate::storage::Storage;

pub struct StudentService;

impl StudentService {
    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        super::request_storage(request)
    }

    // 课程名单：某门课下已选课的全部学生（教师视角）
    pub async fn roster(&self, course_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        roster::handle_roster(self, course_id, request).await
    }

    // 教师代学生建档
    pub async fn create_student(
        &self,
        create_request: CreateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::handle_create_student(self, create_request, request).await
    }

    // 学生详情（教师视角，选课标记限定在该教师的任教课程内）
    pub async fn student_detail(
        &self,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        detail::handle_student_detail(self, student_id, request).await
    }

    // 教师编辑学生资料并调和其选课
    pub async fn update_student(
        &self,
        student_id: i64,
        update_data: UpdateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::handle_update_student(self, student_id, update_data, request).await
    }

    // 学生仪表盘：本人信息 + 已选课程
    pub async fn dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        dashboard::handle_dashboard(self, request).await
    }

    // 获取学生本人资料（含全部课程及选课标记）
    pub async fn get_profile(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        profile::handle_get_profile(self, request).await
    }

    // 学生本人更新资料并调和选课
    pub async fn update_profile(
        &self,
        update_data: UpdateStudentProfileRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profile::handle_update_profile(self, update_data, request).await
    }
}
