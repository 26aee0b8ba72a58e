use async_graphql::{Context, Object, Result, ResultExt, ID};
use chrono::Utc;
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::extract_identity_from_context,
    errors::AppError,
    graphql::helpers::parse_id,
    models::{
        domain::{QuestionDraft, Quiz},
        dto::{
            request::{CreateQuizRequest, QuestionInput},
            response::{AttemptRecordDto, SessionView, SubmitAnswerPayload},
        },
    },
    services::SubmitResult,
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_quiz(&self, ctx: &Context<'_>, input: CreateQuizRequest) -> Result<Quiz> {
        let state = ctx.data::<AppState>()?;
        let actor = extract_identity_from_context(ctx).extend()?;

        state.quiz_service.create_quiz(&actor, input).await.extend()
    }

    async fn add_question(
        &self,
        ctx: &Context<'_>,
        quiz_id: ID,
        input: QuestionInput,
    ) -> Result<Quiz> {
        let state = ctx.data::<AppState>()?;
        let actor = extract_identity_from_context(ctx).extend()?;

        let quiz_id = parse_id(&quiz_id).extend()?;
        input.validate().map_err(AppError::from).extend()?;

        state
            .quiz_service
            .add_question(&actor, &quiz_id, &QuestionDraft::from(&input))
            .await
            .extend()
    }

    async fn remove_question(
        &self,
        ctx: &Context<'_>,
        quiz_id: ID,
        question_id: u32,
    ) -> Result<Quiz> {
        let state = ctx.data::<AppState>()?;
        let actor = extract_identity_from_context(ctx).extend()?;

        let quiz_id = parse_id(&quiz_id).extend()?;
        state
            .quiz_service
            .remove_question(&actor, &quiz_id, question_id)
            .await
            .extend()
    }

    async fn toggle_publish(&self, ctx: &Context<'_>, quiz_id: ID) -> Result<Quiz> {
        let state = ctx.data::<AppState>()?;
        let actor = extract_identity_from_context(ctx).extend()?;

        let quiz_id = parse_id(&quiz_id).extend()?;
        state
            .quiz_service
            .toggle_publish(&actor, &quiz_id)
            .await
            .extend()
    }

    async fn start_quiz(&self, ctx: &Context<'_>, quiz_id: ID) -> Result<SessionView> {
        let state = ctx.data::<AppState>()?;
        let actor = extract_identity_from_context(ctx).extend()?;

        let quiz_id = parse_id(&quiz_id).extend()?;
        let session = state
            .attempt_service
            .start_quiz(&actor, &quiz_id)
            .await
            .extend()?;
        Ok(SessionView::new(&session, Utc::now()))
    }

    async fn select_answer(&self, ctx: &Context<'_>, answer: String) -> Result<SessionView> {
        let state = ctx.data::<AppState>()?;
        let actor = extract_identity_from_context(ctx).extend()?;

        let session = state
            .attempt_service
            .select_answer(&actor, &answer)
            .await
            .extend()?;
        Ok(SessionView::new(&session, Utc::now()))
    }

    /// Submits `answer`, or the selected answer when omitted.
    async fn submit_answer(
        &self,
        ctx: &Context<'_>,
        answer: Option<String>,
    ) -> Result<SubmitAnswerPayload> {
        let state = ctx.data::<AppState>()?;
        let actor = extract_identity_from_context(ctx).extend()?;

        let result = state
            .attempt_service
            .submit_answer(&actor, answer.as_deref())
            .await
            .extend()?;

        Ok(match result {
            SubmitResult::InProgress(session) => SubmitAnswerPayload {
                completed: false,
                session: Some(SessionView::new(&session, Utc::now())),
                attempt: None,
            },
            SubmitResult::Completed(record) => SubmitAnswerPayload {
                completed: true,
                session: None,
                attempt: Some(AttemptRecordDto::from(record)),
            },
        })
    }

    /// Abandons the current session. Nothing is recorded.
    async fn exit_quiz(&self, ctx: &Context<'_>) -> Result<bool> {
        let state = ctx.data::<AppState>()?;
        let actor = extract_identity_from_context(ctx).extend()?;

        state.attempt_service.exit_quiz(&actor).await.extend()
    }
}
