//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::PostService;
use blog_core::domain::User;
use blog_core::ports::{
    PasswordService, PostRepository, PubSub, TokenService, UserRepository,
};
use blog_infra::{
    Argon2PasswordService, InMemoryPostRepository, InMemoryPubSub, InMemoryUserRepository,
    JwtConfig, JwtTokenService,
};

use crate::config::{AdminAccount, AppConfig};
use crate::middleware::error::AppResult;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub cookie_secure: bool,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let (post_repo, users) = Self::repositories(config).await;
        let pubsub: Arc<dyn PubSub> = Arc::new(InMemoryPubSub::new(config.pubsub_buffer));

        let state = Self::from_parts(
            PostService::new(post_repo, pubsub),
            users,
            config.jwt.clone(),
            config.cookie_secure,
        );

        if let Some(admin) = &config.admin {
            if let Err(e) = state.ensure_account(admin).await {
                tracing::error!(error = %e, "Failed to provision admin account");
            }
        }

        tracing::info!("Application state initialized");
        state
    }

    /// Assemble state around an already built post service.
    pub fn from_parts(
        posts: PostService,
        users: Arc<dyn UserRepository>,
        jwt: JwtConfig,
        cookie_secure: bool,
    ) -> Self {
        Self {
            posts: Arc::new(posts),
            users,
            tokens: Arc::new(JwtTokenService::new(jwt)),
            passwords: Arc::new(Argon2PasswordService::new()),
            cookie_secure,
        }
    }

    /// Create the configured account unless its email is already known.
    pub async fn ensure_account(&self, account: &AdminAccount) -> AppResult<()> {
        if self.users.find_by_email(&account.email).await?.is_some() {
            tracing::debug!("Admin account already present");
            return Ok(());
        }

        let hash = self.passwords.hash(&account.password)?;
        let user = self
            .users
            .save(User::new(account.email.clone(), hash))
            .await?;

        tracing::info!(user_id = %user.id, "Admin account created");
        Ok(())
    }

    #[cfg(feature = "postgres")]
    async fn repositories(
        config: &AppConfig,
    ) -> (Arc<dyn PostRepository>, Arc<dyn UserRepository>) {
        use blog_infra::database::{
            DatabaseConfig, PostgresPostRepository, PostgresUserRepository, connect,
        };

        let Some(settings) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Self::in_memory_repositories();
        };

        let db_config = DatabaseConfig {
            url: settings.url.clone(),
            max_connections: settings.max_connections,
            min_connections: settings.min_connections,
        };

        match connect(&db_config).await {
            Ok(conn) => (
                Arc::new(PostgresPostRepository::new(conn.clone())),
                Arc::new(PostgresUserRepository::new(conn)),
            ),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Self::in_memory_repositories()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn repositories(
        _config: &AppConfig,
    ) -> (Arc<dyn PostRepository>, Arc<dyn UserRepository>) {
        tracing::info!("Running without postgres feature - using in-memory repositories");
        Self::in_memory_repositories()
    }

    fn in_memory_repositories() -> (Arc<dyn PostRepository>, Arc<dyn UserRepository>) {
        (
            Arc::new(InMemoryPostRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
        )
    }
}
