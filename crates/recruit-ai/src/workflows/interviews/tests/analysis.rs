use super::common::*;

use crate::workflows::interviews::{
    AnswerAccuracy, InterviewAnalysisError, InterviewAnalysisRequest, InterviewAnalyzer,
    SentimentBreakdown, TimeBreakdown, TranscriptAnalyzer,
};
use crate::workflows::screening::ScoreCategory;

#[test]
fn hedged_answers_lower_confidence_and_scores() {
    let analysis = TranscriptAnalyzer
        .analyze(&java_request())
        .expect("transcript analyzes");

    assert_eq!(analysis.qa_pairs.len(), 3);
    assert!(analysis
        .qa_pairs
        .iter()
        .all(|qa| qa.accuracy == AnswerAccuracy::Correct));
    assert!((analysis.qa_pairs[0].confidence - 0.9).abs() < 1e-9);
    assert!((analysis.qa_pairs[1].confidence - 0.6).abs() < 1e-9);
    assert!((analysis.qa_pairs[2].confidence - 1.0).abs() < 1e-9);
    assert!((analysis.confidence - 0.83).abs() < 1e-9);

    assert_eq!(analysis.technical_score, 83);
    assert_eq!(analysis.communication_score, 87);
    assert_eq!(analysis.overall_score, 85);
    assert_eq!(analysis.category, ScoreCategory::Excellent);
    assert!(analysis
        .key_insights
        .contains(&"Hedging language in 2 of 3 answers".to_string()));
    assert!(analysis.key_insights.contains(
        &"Weakest answer: \"Fine. Explain the difference between the JDK, the JVM and the JRE.\""
            .to_string()
    ));
    assert_eq!(
        analysis.summary,
        "Ravi Kumar answered 3 of 3 questions. Technical 83%, communication 87%, overall 85% (Excellent)."
    );
}

#[test]
fn wrapped_lines_stay_with_their_answer() {
    let analysis = TranscriptAnalyzer
        .analyze(&java_request())
        .expect("transcript analyzes");

    let answer = &analysis.qa_pairs[1].answer;
    assert!(answer.starts_with("The JDK is basically the toolkit"));
    assert!(answer.ends_with("I think that covers the main difference."));
    assert_eq!(analysis.qa_pairs[2].question, "Does Java have pointers?");
    assert_eq!(analysis.transcript, JAVA_SCREEN);
}

#[test]
fn non_answers_count_as_incorrect() {
    let analysis = TranscriptAnalyzer
        .analyze(&platform_request())
        .expect("transcript analyzes");

    let accuracy: Vec<AnswerAccuracy> = analysis.qa_pairs.iter().map(|qa| qa.accuracy).collect();
    assert_eq!(
        accuracy,
        [
            AnswerAccuracy::Correct,
            AnswerAccuracy::Correct,
            AnswerAccuracy::Incorrect
        ]
    );
    assert_eq!(analysis.technical_score, 67);
    assert_eq!(analysis.communication_score, 93);
    assert_eq!(analysis.overall_score, 77);
    assert_eq!(analysis.category, ScoreCategory::Good);
    assert_eq!(
        analysis.key_insights,
        [
            "2 of 3 answers were complete and on topic".to_string(),
            "Weakest answer: \"Do you have any questions for us?\"".to_string(),
        ]
    );
}

#[test]
fn expected_topics_shift_the_technical_score() {
    let request = platform_request().with_topics(["Rust", "Kubernetes", "Kafka", "idempotency"]);
    let analysis = TranscriptAnalyzer.analyze(&request).expect("transcript analyzes");

    assert_eq!(analysis.technical_score, 69);
    assert_eq!(analysis.overall_score, 79);
    assert!(analysis
        .key_insights
        .contains(&"Covered 3 of 4 expected topics; missing Kafka".to_string()));
}

#[test]
fn sentiment_and_time_split_sum_to_one_hundred() {
    let analysis = TranscriptAnalyzer
        .analyze(&platform_request())
        .expect("transcript analyzes");

    assert_eq!(
        analysis.sentiment,
        SentimentBreakdown {
            positive: 0,
            neutral: 67,
            negative: 33,
        }
    );
    assert_eq!(
        analysis.time_breakdown,
        TimeBreakdown {
            introduction: 40,
            technical: 39,
            behavioral: 0,
            questions: 21,
            closing: 0,
        }
    );

    let java = TranscriptAnalyzer
        .analyze(&java_request())
        .expect("transcript analyzes");
    assert_eq!(java.sentiment.neutral, 100);
    assert_eq!(java.time_breakdown.technical, 100);
}

#[test]
fn unanswered_questions_score_zero() {
    let request = InterviewAnalysisRequest::new(
        "",
        "Interviewer: Why Rust?\n\
         Candidate: Because the compiler catches whole classes of bugs before they ship to production.\n\
         Interviewer: Thank you for your time.",
    );
    let analysis = TranscriptAnalyzer.analyze(&request).expect("transcript analyzes");

    assert_eq!(analysis.qa_pairs[1].answer, "");
    assert_eq!(analysis.qa_pairs[1].accuracy, AnswerAccuracy::Incorrect);
    assert_eq!(analysis.qa_pairs[1].confidence, 0.0);
    assert_eq!(analysis.overall_score, 50);
    assert_eq!(analysis.category, ScoreCategory::Poor);
    assert!(analysis
        .key_insights
        .contains(&"1 of 2 questions went unanswered".to_string()));
    assert!(analysis.time_breakdown.closing > 0);
    assert!(analysis.summary.starts_with("The candidate answered 1 of 2 questions."));
}

#[test]
fn blank_or_question_free_transcripts_are_rejected() {
    let blank = InterviewAnalysisRequest::new("Ada", "  \n\t ");
    assert_eq!(
        TranscriptAnalyzer.analyze(&blank),
        Err(InterviewAnalysisError::EmptyTranscript)
    );

    for transcript in ["Candidate: I love Rust.", "just some notes about the call"] {
        let request = InterviewAnalysisRequest::new("Ada", transcript);
        assert_eq!(
            TranscriptAnalyzer.analyze(&request),
            Err(InterviewAnalysisError::NoQuestions),
            "{transcript}"
        );
    }
}

#[test]
fn analysis_serializes_with_camel_case_fields() {
    let analysis = TranscriptAnalyzer
        .analyze(&platform_request())
        .expect("transcript analyzes");
    let value = serde_json::to_value(&analysis).expect("serializes");

    assert_eq!(value["overallScore"], 77);
    assert_eq!(value["category"], "good");
    assert_eq!(value["sentimentAnalysis"]["negative"], 33);
    assert_eq!(value["qaPairs"][2]["accuracy"], "incorrect");
    assert_eq!(value["timeBreakdown"]["questions"], 21);
}
