use crate::{
    abstract_trait::{
        hashing::DynHashing,
        user::{
            DynUserCommandRepository, DynUserQueryRepository, UserCommandServiceTrait,
            UserQueryServiceTrait,
        },
    },
    domain::{
        requests::user::{CreateUserRequest, FindAllUsers, UpdateUserRequest},
        responses::{
            api::{ApiResponse, ApiResponsePagination},
            pagination::Pagination,
            user::UserResponse,
        },
    },
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, Status},
};
use async_trait::async_trait;
use tokio::time::Instant;
use tracing::info;

#[derive(Clone)]
pub struct UserQueryService {
    pub query: DynUserQueryRepository,
    pub metrics: Metrics,
}

impl UserQueryService {
    pub fn new(query: DynUserQueryRepository, metrics: Metrics) -> Self {
        Self { query, metrics }
    }
}

#[async_trait]
impl UserQueryServiceTrait for UserQueryService {
    async fn find_all(
        &self,
        req: &FindAllUsers,
    ) -> Result<ApiResponsePagination<Vec<UserResponse>>, ServiceError> {
        info!(
            "🔍 Finding all users | Page: {}, Size: {}, Search: '{}'",
            req.page, req.page_size, req.search
        );

        let started = Instant::now();
        let page = req.page.max(1);
        let page_size = req.page_size.max(1);

        let normalized = FindAllUsers {
            page,
            page_size,
            search: req.search.clone(),
        };

        match self.query.find_all(&normalized).await {
            Ok((users, total)) => {
                self.metrics
                    .record(Method::Get, Status::Success, started.elapsed().as_secs_f64());

                Ok(ApiResponsePagination {
                    status: "success".to_string(),
                    message: "Users retrieved successfully".to_string(),
                    data: users.into_iter().map(UserResponse::from).collect(),
                    pagination: Pagination::new(page, page_size, total),
                })
            }
            Err(err) => {
                self.metrics
                    .record(Method::Get, Status::Error, started.elapsed().as_secs_f64());
                Err(err.into())
            }
        }
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("🔍 Finding user by ID: {id}");

        let started = Instant::now();

        let result = self
            .query
            .find_by_id(id)
            .await
            .and_then(|user| user.ok_or(RepositoryError::NotFound));

        match result {
            Ok(user) => {
                self.metrics
                    .record(Method::Get, Status::Success, started.elapsed().as_secs_f64());

                Ok(ApiResponse {
                    status: "success".to_string(),
                    message: "User retrieved successfully".to_string(),
                    data: user.into(),
                })
            }
            Err(err) => {
                self.metrics
                    .record(Method::Get, Status::Error, started.elapsed().as_secs_f64());
                Err(err.into())
            }
        }
    }
}

#[derive(Clone)]
pub struct UserCommandService {
    pub command: DynUserCommandRepository,
    pub hashing: DynHashing,
    pub metrics: Metrics,
}

impl UserCommandService {
    pub fn new(command: DynUserCommandRepository, hashing: DynHashing, metrics: Metrics) -> Self {
        Self {
            command,
            hashing,
            metrics,
        }
    }
}

#[async_trait]
impl UserCommandServiceTrait for UserCommandService {
    async fn create(
        &self,
        req: &CreateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("👤 Creating user '{}'", req.username);

        let started = Instant::now();

        let result = async {
            let hashed = self.hashing.hash_password(&req.password).await?;

            let record = CreateUserRequest {
                username: req.username.clone(),
                email: req.email.clone(),
                password: hashed,
            };

            let user = self.command.create(&record).await?;
            Ok::<_, ServiceError>(user)
        }
        .await;

        match result {
            Ok(user) => {
                self.metrics
                    .record(Method::Post, Status::Success, started.elapsed().as_secs_f64());

                Ok(ApiResponse {
                    status: "success".to_string(),
                    message: "User created successfully".to_string(),
                    data: user.into(),
                })
            }
            Err(err) => {
                self.metrics
                    .record(Method::Post, Status::Error, started.elapsed().as_secs_f64());
                Err(err)
            }
        }
    }

    async fn update(
        &self,
        id: i32,
        req: &UpdateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("🔄 Updating user ID {id}");

        let started = Instant::now();

        let result = async {
            let password = match &req.password {
                Some(plain) => Some(self.hashing.hash_password(plain).await?),
                None => None,
            };

            let record = UpdateUserRequest {
                username: req.username.clone(),
                email: req.email.clone(),
                password,
            };

            let user = self.command.update(id, &record).await?;
            Ok::<_, ServiceError>(user)
        }
        .await;

        match result {
            Ok(user) => {
                self.metrics
                    .record(Method::Put, Status::Success, started.elapsed().as_secs_f64());

                Ok(ApiResponse {
                    status: "success".to_string(),
                    message: "User updated successfully".to_string(),
                    data: user.into(),
                })
            }
            Err(err) => {
                self.metrics
                    .record(Method::Put, Status::Error, started.elapsed().as_secs_f64());
                Err(err)
            }
        }
    }

    async fn delete(&self, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        info!("🗑️ Deleting user ID {id}");

        let started = Instant::now();

        match self.command.delete(id).await {
            Ok(()) => {
                self.metrics.record(
                    Method::Delete,
                    Status::Success,
                    started.elapsed().as_secs_f64(),
                );

                Ok(ApiResponse {
                    status: "success".to_string(),
                    message: "User deleted successfully".to_string(),
                    data: (),
                })
            }
            Err(err) => {
                self.metrics.record(
                    Method::Delete,
                    Status::Error,
                    started.elapsed().as_secs_f64(),
                );
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::hashing::HashingTrait;
    use crate::abstract_trait::user::UserCommandRepositoryTrait;
    use crate::model::user::User as UserModel;
    use std::sync::{Arc, Mutex};

    struct FakeHashing;

    #[async_trait]
    impl HashingTrait for FakeHashing {
        async fn hash_password(&self, password: &str) -> Result<String, ServiceError> {
            Ok(format!("hashed::{password}"))
        }
    }

    #[derive(Default)]
    struct RecordingUserCommandRepo {
        created: Mutex<Vec<CreateUserRequest>>,
    }

    #[async_trait]
    impl UserCommandRepositoryTrait for RecordingUserCommandRepo {
        async fn create(&self, req: &CreateUserRequest) -> Result<UserModel, RepositoryError> {
            self.created.lock().unwrap().push(req.clone());
            Ok(UserModel {
                user_id: 1,
                username: req.username.clone(),
                email: req.email.clone(),
                password: req.password.clone(),
                created_at: None,
                updated_at: None,
            })
        }

        async fn update(
            &self,
            _id: i32,
            _req: &UpdateUserRequest,
        ) -> Result<UserModel, RepositoryError> {
            Err(RepositoryError::NotFound)
        }

        async fn delete(&self, _id: i32) -> Result<(), RepositoryError> {
            Err(RepositoryError::NotFound)
        }
    }

    #[tokio::test]
    async fn create_stores_the_hash_and_never_echoes_the_password() {
        let repo = Arc::new(RecordingUserCommandRepo::default());
        let service = UserCommandService::new(repo.clone(), Arc::new(FakeHashing), Metrics::new());

        let req = CreateUserRequest {
            username: "knight".into(),
            email: "knight@example.com".into(),
            password: "hunter22".into(),
        };

        let response = service.create(&req).await.unwrap();

        let created = repo.created.lock().unwrap();
        assert_eq!(created[0].password, "hashed::hunter22");

        let json = serde_json::to_value(&response.data).unwrap();
        assert!(json.get("password").is_none());
    }

    #[tokio::test]
    async fn delete_of_missing_user_surfaces_not_found() {
        let repo = Arc::new(RecordingUserCommandRepo::default());
        let service = UserCommandService::new(repo, Arc::new(FakeHashing), Metrics::new());

        let err = service.delete(42).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Repo(RepositoryError::NotFound)
        ));
    }
}
