pub mod edit;
pub mod history;
pub mod records;
pub mod save;
pub mod sheet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attendance::requests::{
    AttendanceRecordsQuery, EditAttendanceRequest, SaveAttendanceSheetRequest,
};
use crate::storage::Storage;

pub struct AttendanceService;

impl AttendanceService {
    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        super::request_storage(request)
    }

    // 点名页：课程名单 + 历史日期汇总
    pub async fn sheet(&self, course_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        sheet::handle_sheet(self, course_id, request).await
    }

    // 保存点名表（同日重复提交会覆盖已有记录）
    pub async fn save(
        &self,
        course_id: i64,
        save_request: SaveAttendanceSheetRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        save::handle_save(self, course_id, save_request, request).await
    }

    // 某日期的全部考勤记录
    pub async fn records(
        &self,
        course_id: i64,
        query: AttendanceRecordsQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        records::handle_records(self, course_id, query, request).await
    }

    // 按记录 ID 批量修正状态
    pub async fn edit(
        &self,
        course_id: i64,
        edit_request: EditAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        edit::handle_edit(self, course_id, edit_request, request).await
    }

    // 学生视角：本人在某课程的考勤历史
    pub async fn history(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        history::handle_history(self, course_id, request).await
    }
}
