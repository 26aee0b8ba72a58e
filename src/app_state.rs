use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    constants::demo_catalog::{demo_quizzes, DEMO_AUTHOR_ID, DEMO_AUTHOR_NAME},
    errors::AppResult,
    models::domain::{Identity, UserRole},
    repositories::{
        InMemoryQuizAttemptRepository, InMemoryQuizRepository, InMemorySessionRepository,
        QuizAttemptRepository, QuizRepository, SessionRepository,
    },
    services::{QuizAttemptService, QuizService},
};

/// The whole engine: catalog, sessions and attempt history behind the
/// services that guard them.
#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub attempt_service: Arc<QuizAttemptService>,
    pub jwt_service: Arc<JwtService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let quiz_repository: Arc<dyn QuizRepository> = Arc::new(InMemoryQuizRepository::new());
        let attempt_repository: Arc<dyn QuizAttemptRepository> =
            Arc::new(InMemoryQuizAttemptRepository::new());
        let session_repository: Arc<dyn SessionRepository> =
            Arc::new(InMemorySessionRepository::new());

        let quiz_service = Arc::new(QuizService::new(
            quiz_repository.clone(),
            session_repository.clone(),
        ));
        let attempt_service = Arc::new(QuizAttemptService::new(
            quiz_repository,
            attempt_repository,
            session_repository,
            config.grading_strategy,
        ));
        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
        ));

        let seed = config.seed_demo_data;
        let state = Self {
            quiz_service,
            attempt_service,
            jwt_service,
            config: Arc::new(config),
        };

        if seed {
            let seeded = state.seed_demo_catalog().await?;
            log::info!("Seeded {} demo quizzes", seeded);
        }

        Ok(state)
    }

    /// Loads the demo catalog and returns how many quizzes were created.
    pub async fn seed_demo_catalog(&self) -> AppResult<usize> {
        let author = Identity::new(DEMO_AUTHOR_ID, DEMO_AUTHOR_NAME, UserRole::Teacher);
        let mut count = 0;

        for demo in demo_quizzes() {
            let quiz = self.quiz_service.create_quiz(&author, demo.request).await?;
            if demo.published {
                self.quiz_service.toggle_publish(&author, &quiz.id).await?;
            }
            count += 1;
        }

        Ok(count)
    }

    /// Empties the catalog, every session and the attempt history.
    pub async fn reset(&self) -> AppResult<()> {
        self.attempt_service.reset().await?;
        self.quiz_service.reset().await?;
        log::info!("Store reset");
        Ok(())
    }
}
