use async_graphql::{Context, Object, Result, ResultExt, ID};

use crate::{
    app_state::AppState,
    auth::extract_identity_from_context,
    graphql::helpers::parse_id,
    models::{
        domain::{Identity, Quiz},
        dto::response::{
            AssessmentReport, AttemptRecordDto, QuizForTaking, QuizStatistics, QuizSummary,
            SessionView,
        },
    },
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// The acting identity.
    async fn me(&self, ctx: &Context<'_>) -> Result<Identity> {
        extract_identity_from_context(ctx).extend()
    }

    /// Catalog visible to the actor; learners only see published quizzes.
    async fn quizzes(&self, ctx: &Context<'_>) -> Result<Vec<QuizSummary>> {
        let state = ctx.data::<AppState>()?;
        let actor = extract_identity_from_context(ctx).extend()?;

        let quizzes = state.quiz_service.list_quizzes(&actor).await.extend()?;
        Ok(quizzes.iter().map(QuizSummary::from).collect())
    }

    /// Full quiz including correct answers.
    async fn quiz(&self, ctx: &Context<'_>, id: ID) -> Result<Quiz> {
        let state = ctx.data::<AppState>()?;
        let actor = extract_identity_from_context(ctx).extend()?;

        let quiz_id = parse_id(&id).extend()?;
        state.quiz_service.get_quiz(&actor, &quiz_id).await.extend()
    }

    async fn quiz_for_taking(&self, ctx: &Context<'_>, id: ID) -> Result<QuizForTaking> {
        let state = ctx.data::<AppState>()?;
        let actor = extract_identity_from_context(ctx).extend()?;

        let quiz_id = parse_id(&id).extend()?;
        state
            .quiz_service
            .get_quiz_for_taking(&actor, &quiz_id)
            .await
            .extend()
    }

    async fn active_session(&self, ctx: &Context<'_>) -> Result<Option<SessionView>> {
        let state = ctx.data::<AppState>()?;
        let actor = extract_identity_from_context(ctx).extend()?;

        let session = state.attempt_service.active_session(&actor).await.extend()?;
        Ok(session.map(|s| SessionView::new(&s, chrono::Utc::now())))
    }

    async fn my_attempts(
        &self,
        ctx: &Context<'_>,
        quiz_id: Option<ID>,
    ) -> Result<Vec<AttemptRecordDto>> {
        let state = ctx.data::<AppState>()?;
        let actor = extract_identity_from_context(ctx).extend()?;

        let quiz_id = quiz_id.map(|id| parse_id(&id)).transpose().extend()?;
        let attempts = state
            .attempt_service
            .my_attempts(&actor, quiz_id)
            .await
            .extend()?;
        Ok(attempts.into_iter().map(AttemptRecordDto::from).collect())
    }

    async fn attempt(&self, ctx: &Context<'_>, id: ID) -> Result<AttemptRecordDto> {
        let state = ctx.data::<AppState>()?;
        let actor = extract_identity_from_context(ctx).extend()?;

        let attempt_id = parse_id(&id).extend()?;
        let attempt = state
            .attempt_service
            .get_attempt(&actor, &attempt_id)
            .await
            .extend()?;
        Ok(attempt.into())
    }

    async fn quiz_attempts(&self, ctx: &Context<'_>, quiz_id: ID) -> Result<Vec<AttemptRecordDto>> {
        let state = ctx.data::<AppState>()?;
        let actor = extract_identity_from_context(ctx).extend()?;

        let quiz_id = parse_id(&quiz_id).extend()?;
        let attempts = state
            .attempt_service
            .quiz_attempts(&actor, &quiz_id)
            .await
            .extend()?;
        Ok(attempts.into_iter().map(AttemptRecordDto::from).collect())
    }

    async fn quiz_statistics(&self, ctx: &Context<'_>, quiz_id: ID) -> Result<QuizStatistics> {
        let state = ctx.data::<AppState>()?;
        let actor = extract_identity_from_context(ctx).extend()?;

        let quiz_id = parse_id(&quiz_id).extend()?;
        state
            .attempt_service
            .quiz_statistics(&actor, &quiz_id)
            .await
            .extend()
    }

    async fn assessment_report(&self, ctx: &Context<'_>, attempt_id: ID) -> Result<AssessmentReport> {
        let state = ctx.data::<AppState>()?;
        let actor = extract_identity_from_context(ctx).extend()?;

        let attempt_id = parse_id(&attempt_id).extend()?;
        state
            .attempt_service
            .assessment_report(&actor, &attempt_id)
            .await
            .extend()
    }
}
