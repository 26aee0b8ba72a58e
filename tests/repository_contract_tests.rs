use std::{collections::BTreeMap, sync::Arc};

use chrono::Utc;
use uuid::Uuid;

use quiz_engine::{
    errors::AppError,
    models::domain::{AttemptRecord, AttemptSession, Identity, QuestionDraft, Quiz, UserRole},
    repositories::{
        InMemoryQuizAttemptRepository, InMemoryQuizRepository, InMemorySessionRepository,
        QuizAttemptRepository, QuizRepository, SessionRepository,
    },
};

fn make_quiz(title: &str) -> Quiz {
    let mut quiz = Quiz::new(title, "Contract test quiz", "c-1", "Course", 10, "teacher-a");
    quiz.append_question(&QuestionDraft::true_false("Is this a test?", "True", 5))
        .expect("question should be valid");
    quiz
}

fn make_attempt(student_id: &str, quiz_id: Uuid, score: u32) -> AttemptRecord {
    let now = Utc::now();
    AttemptRecord {
        id: Uuid::new_v4(),
        quiz_id,
        quiz_title: "Quiz".to_string(),
        student_id: student_id.to_string(),
        student_name: format!("Student {}", student_id),
        answers: BTreeMap::from([(1, "True".to_string())]),
        question_results: Vec::new(),
        score,
        total_points: 5,
        started_at: now,
        completed_at: now,
        time_spent: 0,
    }
}

fn make_session(student_id: &str, quiz: &Quiz) -> AttemptSession {
    let learner = Identity::new(student_id, "Learner", UserRole::Student);
    AttemptSession::start(quiz, &learner, Utc::now()).expect("session should start")
}

#[tokio::test]
async fn quiz_repository_crud_and_error_paths() {
    let repo = InMemoryQuizRepository::new();

    let quiz1 = make_quiz("Quiz One");
    let quiz2 = make_quiz("Quiz Two");

    let created1 = repo.create(quiz1.clone()).await.expect("create quiz1");
    assert_eq!(created1.id, quiz1.id);
    repo.create(quiz2.clone()).await.expect("create quiz2");

    let duplicate = repo.create(quiz1.clone()).await;
    assert!(matches!(duplicate, Err(AppError::AlreadyExists(_))));

    let found = repo.find_by_id(&quiz1.id).await.expect("find should work");
    assert_eq!(found, Some(quiz1.clone()));
    let missing = repo.find_by_id(&Uuid::new_v4()).await.expect("find should work");
    assert!(missing.is_none());

    let titles: Vec<String> = repo
        .list_quizzes()
        .await
        .expect("list should work")
        .into_iter()
        .map(|q| q.title)
        .collect();
    assert_eq!(titles, vec!["Quiz One", "Quiz Two"]);

    let mut quiz1_updated = quiz1.clone();
    quiz1_updated.toggle_publish();
    let updated = repo.update(quiz1_updated).await.expect("update should work");
    assert!(updated.is_published);
    let listed = repo.list_quizzes().await.expect("list should work");
    assert_eq!(listed[0].id, quiz1.id, "update keeps catalog order");

    let missing_update = repo.update(make_quiz("Missing")).await;
    assert!(matches!(missing_update, Err(AppError::NotFound(_))));

    repo.clear().await.expect("clear should work");
    assert!(repo.list_quizzes().await.expect("list should work").is_empty());
}

#[tokio::test]
async fn quiz_repository_counts_attempts_in_place() {
    let repo = InMemoryQuizRepository::new();
    let quiz = repo.create(make_quiz("Counted")).await.expect("create");

    assert_eq!(repo.increment_attempts(&quiz.id).await.expect("increment"), Some(1));
    assert_eq!(repo.increment_attempts(&quiz.id).await.expect("increment"), Some(2));

    // A copy read before the attempts were counted must not roll them back.
    let mut stale = quiz.clone();
    stale.toggle_publish();
    let updated = repo.update(stale).await.expect("update");
    assert!(updated.is_published);
    assert_eq!(updated.attempts, 2);

    let missing = repo
        .increment_attempts(&Uuid::new_v4())
        .await
        .expect("increment");
    assert!(missing.is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn quiz_repository_keeps_attempts_under_concurrent_edits() {
    let repo = Arc::new(InMemoryQuizRepository::new());
    let quiz = repo.create(make_quiz("Busy")).await.expect("create");

    let mut handles = Vec::new();
    for i in 0..50 {
        let repo = repo.clone();
        let quiz_id = quiz.id;
        handles.push(tokio::spawn(async move {
            if i % 2 == 0 {
                repo.increment_attempts(&quiz_id).await.map(|_| ())
            } else {
                let mut current = repo
                    .find_by_id(&quiz_id)
                    .await
                    .expect("find should work")
                    .expect("quiz should exist");
                tokio::task::yield_now().await;
                current.toggle_publish();
                repo.update(current).await.map(|_| ())
            }
        }));
    }
    for handle in handles {
        handle.await.expect("task").expect("repository call");
    }

    let stored = repo.find_by_id(&quiz.id).await.expect("find").expect("quiz");
    assert_eq!(stored.attempts, 25);
}

#[tokio::test]
async fn quiz_attempt_repository_appends_and_filters() {
    let repo = InMemoryQuizAttemptRepository::new();
    let quiz_a = Uuid::new_v4();
    let quiz_b = Uuid::new_v4();

    let attempt1 = make_attempt("student-a", quiz_a, 5);
    let attempt2 = make_attempt("student-a", quiz_a, 0);
    let attempt3 = make_attempt("student-a", quiz_b, 5);
    let attempt4 = make_attempt("student-b", quiz_a, 5);

    for attempt in [&attempt1, &attempt2, &attempt3, &attempt4] {
        repo.create(attempt.clone()).await.expect("create attempt");
    }

    let duplicate = repo.create(attempt1.clone()).await;
    assert!(matches!(duplicate, Err(AppError::AlreadyExists(_))));

    let found = repo.find_by_id(&attempt1.id).await.expect("find should work");
    assert_eq!(found, Some(attempt1.clone()));

    let all_for_student = repo
        .find_by_student("student-a", None)
        .await
        .expect("query should work");
    assert_eq!(all_for_student.len(), 3);
    assert_eq!(all_for_student[0].id, attempt1.id, "history keeps append order");

    let filtered = repo
        .find_by_student("student-a", Some(quiz_a))
        .await
        .expect("filtered query should work");
    assert_eq!(filtered.len(), 2);

    let by_quiz = repo.find_by_quiz(&quiz_a).await.expect("query should work");
    assert_eq!(by_quiz.len(), 3);

    repo.clear().await.expect("clear should work");
    assert!(repo.find_by_quiz(&quiz_a).await.expect("query should work").is_empty());
}

#[tokio::test]
async fn session_repository_keeps_one_session_per_student() {
    let repo = InMemorySessionRepository::new();
    let quiz_one = make_quiz("One");
    let quiz_two = make_quiz("Two");

    repo.save(make_session("student-a", &quiz_one))
        .await
        .expect("save should work");
    repo.save(make_session("student-a", &quiz_two))
        .await
        .expect("save should replace");
    repo.save(make_session("student-b", &quiz_one))
        .await
        .expect("save should work");

    let session = repo
        .find_by_student("student-a")
        .await
        .expect("find should work")
        .expect("session should exist");
    assert_eq!(session.quiz_id, quiz_two.id);

    let removed = repo
        .remove_by_quiz(&quiz_one.id)
        .await
        .expect("remove by quiz should work");
    assert_eq!(removed, 1);
    assert!(repo
        .find_by_student("student-b")
        .await
        .expect("find should work")
        .is_none());

    let removed = repo.remove("student-a").await.expect("remove should work");
    assert!(removed.is_some());
    let removed_again = repo.remove("student-a").await.expect("remove should work");
    assert!(removed_again.is_none());
}
