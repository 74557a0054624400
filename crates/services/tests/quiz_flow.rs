use std::collections::HashSet;

use services::{AppServices, Fault, QuizFilter};
use trivia_core::model::{QuestionDraft, QuestionId};

#[tokio::test]
async fn quiz_flow_plays_a_category_to_exhaustion() {
    let services = AppServices::sqlite("sqlite:file:memdb_quiz_flow?mode=memory&cache=shared")
        .await
        .expect("connect sqlite");
    let questions = services.questions();
    let quiz = services.quiz();

    let science = [
        "What is the chemical symbol for gold?",
        "What planet is closest to the sun?",
        "Who discovered penicillin?",
    ];
    for text in science {
        questions
            .create_question(QuestionDraft::new(text, "A", 1, 3))
            .await
            .expect("create science question");
    }
    questions
        .create_question(QuestionDraft::new("Who painted the Mona Lisa?", "Da Vinci", 2, 1))
        .await
        .expect("create art question");

    let mut seen: HashSet<QuestionId> = HashSet::new();
    let mut remaining = science.len();
    loop {
        let round = quiz
            .next_question(QuizFilter::from_raw(1), &seen)
            .await
            .expect("quiz round");
        assert_eq!(round.current_category, "Science");

        let Some(question) = round.question else {
            assert_eq!(round.total_questions, 0);
            break;
        };
        assert_eq!(round.total_questions, remaining);
        assert!(science.contains(&question.question.as_str()));
        assert!(seen.insert(QuestionId::new(question.id)), "no repeats");
        remaining -= 1;
    }
    assert_eq!(seen.len(), science.len());

    // The art question was untouched by the science session.
    let art_round = quiz
        .next_question(QuizFilter::from_raw(2), &HashSet::new())
        .await
        .expect("art round");
    assert_eq!(art_round.total_questions, 1);
    assert_eq!(art_round.question.unwrap().answer, "Da Vinci");
}

#[tokio::test]
async fn quiz_with_unknown_category_is_a_client_error() {
    let services = AppServices::sqlite("sqlite:file:memdb_quiz_badcat?mode=memory&cache=shared")
        .await
        .expect("connect sqlite");

    let err = services
        .quiz()
        .next_question(QuizFilter::from_raw(99), &HashSet::new())
        .await
        .expect_err("unknown category filter");
    assert_eq!(err, Fault::MalformedRequest);
    assert_eq!(err.code(), 400);
}

#[tokio::test]
async fn quiz_across_all_categories_sees_every_question() {
    let services = AppServices::sqlite("sqlite:file:memdb_quiz_all?mode=memory&cache=shared")
        .await
        .expect("connect sqlite");
    let questions = services.questions();

    for (text, category) in [
        ("Who invented the telephone?", 1),
        ("Who painted Guernica?", 2),
        ("What is the largest lake in Africa?", 3),
    ] {
        questions
            .create_question(QuestionDraft::new(text, "A", category, 2))
            .await
            .expect("create question");
    }

    let mut seen = HashSet::new();
    for expected_remaining in (1..=3).rev() {
        let round = services
            .quiz()
            .next_question(QuizFilter::All, &seen)
            .await
            .expect("round");
        assert_eq!(round.current_category, "All");
        assert_eq!(round.total_questions, expected_remaining);
        seen.insert(QuestionId::new(round.question.unwrap().id));
    }

    let terminal = services
        .quiz()
        .next_question(QuizFilter::All, &seen)
        .await
        .expect("terminal round");
    assert!(terminal.is_exhausted());
}
