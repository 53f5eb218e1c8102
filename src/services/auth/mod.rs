pub mod login;
pub mod logout;
pub mod register;
pub mod token;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::auth::entities::AccountRole;
use crate::models::auth::requests::{
    LoginRequest, StudentRegisterRequest, TeacherRegisterRequest,
};
use crate::storage::Storage;

pub struct AuthService;

impl AuthService {
    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        super::request_storage(request)
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 登录验证（教师与学生共用，角色由路由决定）
    pub async fn login(
        &self,
        role: AccountRole,
        login_request: LoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_login(self, role, login_request, request).await
    }

    // 教师注册
    pub async fn register_teacher(
        &self,
        create_request: TeacherRegisterRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        register::handle_register_teacher(self, create_request, request).await
    }

    // 学生注册
    pub async fn register_student(
        &self,
        create_request: StudentRegisterRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        register::handle_register_student(self, create_request, request).await
    }

    // 刷新令牌
    pub async fn refresh_token(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_refresh_token(self, request).await
    }

    // 验证令牌
    pub async fn verify_token(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_verify_token(self, request).await
    }

    // 获取当前账号信息
    pub async fn get_account(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_get_account(self, request).await
    }

    // 登出
    pub async fn logout(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        logout::handle_logout(request).await
    }
}
