pub mod dashboard;
pub mod profile;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::teachers::requests::UpdateTeacherProfileRequest;
use crate::storage::Storage;

pub struct TeacherService;

impl TeacherService {
    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        super::request_storage(request)
    }

    // 教师仪表盘：本人信息 + 任教课程
    pub async fn dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        dashboard::handle_dashboard(self, request).await
    }

    // 获取教师资料（含全部课程及任教标记）
    pub async fn get_profile(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        profile::handle_get_profile(self, request).await
    }

    // 更新教师资料并调和任教课程
    pub async fn update_profile(
        &self,
        update_data: UpdateTeacherProfileRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profile::handle_update_profile(self, update_data, request).await
    }
}
