use serde::{Deserialize, Serialize};

use crate::workflows::screening::analysis::count_mentions;
use crate::workflows::screening::{classify, ScoreCategory, ScoreVerdict};

/// Answers at least this long count as complete.
const COMPLETE_ANSWER_WORDS: usize = 12;
/// Answers shorter than this cost communication points.
const TERSE_ANSWER_WORDS: usize = 5;
const HEDGE_CONFIDENCE_PENALTY: f64 = 0.1;
const MIN_ANSWER_CONFIDENCE: f64 = 0.3;
const HEDGE_COMMUNICATION_PENALTY: f64 = 8.0;
const TERSE_COMMUNICATION_PENALTY: f64 = 20.0;
/// Share of the overall score carried by the technical score; communication takes the rest.
const TECHNICAL_WEIGHT: f64 = 0.6;
/// Share of the technical score carried by expected-topic coverage, when topics are given.
const TOPIC_WEIGHT: f64 = 0.3;

const INTERVIEWER_LABELS: [&str; 5] = ["interviewer", "q", "question", "recruiter", "hiring manager"];
const HEDGES: [&str; 10] = [
    "i think", "maybe", "not sure", "i guess", "probably", "basically", "kind of", "sort of",
    "um", "uh",
];
const NON_ANSWERS: [&str; 4] = ["i don't know", "i do not know", "no idea", "don't remember"];
const POSITIVE_WORDS: [&str; 12] = [
    "good", "great", "excellent", "enjoy", "enjoyed", "love", "confident", "happy", "excited",
    "successful", "definitely", "proud",
];
const NEGATIVE_WORDS: [&str; 12] = [
    "no", "not", "don't", "can't", "cannot", "never", "difficult", "hard", "problem",
    "unfortunately", "struggled", "failed",
];

const CLOSING_CUES: [&str; 4] = ["thank you for your time", "thanks for your time", "wrap up", "that's all"];
const QUESTIONS_CUES: [&str; 3] = ["questions for", "any questions", "ask us"];
const INTRODUCTION_CUES: [&str; 4] = ["yourself", "introduce", "your background", "walk me through your"];
const BEHAVIORAL_CUES: [&str; 7] = [
    "tell me about a time", "describe a situation", "conflict", "challenge", "disagree",
    "mistake", "teammate",
];

/// Input handed to an [`InterviewAnalyzer`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InterviewAnalysisRequest {
    pub candidate_name: String,
    /// One turn per line, each prefixed with its speaker (`Interviewer:`, `Candidate:`, a name).
    pub transcript: String,
    /// Topics the answers should touch on; empty means accuracy alone drives the technical score.
    pub expected_topics: Vec<String>,
}

impl InterviewAnalysisRequest {
    pub fn new(candidate_name: impl Into<String>, transcript: impl Into<String>) -> Self {
        Self {
            candidate_name: candidate_name.into(),
            transcript: transcript.into(),
            expected_topics: Vec::new(),
        }
    }

    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expected_topics = topics.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerAccuracy {
    Correct,
    Partial,
    Incorrect,
}

impl AnswerAccuracy {
    fn points(self) -> f64 {
        match self {
            AnswerAccuracy::Correct => 100.0,
            AnswerAccuracy::Partial => 60.0,
            AnswerAccuracy::Incorrect => 0.0,
        }
    }
}

/// One interviewer question and everything the candidate said before the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewQa {
    pub question: String,
    pub answer: String,
    /// 0.0 to 1.0.
    pub confidence: f64,
    pub accuracy: AnswerAccuracy,
}

/// Share of candidate sentences per tone, in percent; sums to 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentBreakdown {
    pub positive: u8,
    pub neutral: u8,
    pub negative: u8,
}

/// Share of spoken words per interview section, in percent; sums to 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBreakdown {
    pub introduction: u8,
    pub technical: u8,
    pub behavioral: u8,
    pub questions: u8,
    pub closing: u8,
}

/// Session-scoped review of one interview; nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewAnalysis {
    pub overall_score: u8,
    /// Mean answer confidence, 0.0 to 1.0.
    pub confidence: f64,
    pub communication_score: u8,
    pub technical_score: u8,
    pub category: ScoreCategory,
    pub transcript: String,
    #[serde(rename = "sentimentAnalysis")]
    pub sentiment: SentimentBreakdown,
    pub qa_pairs: Vec<InterviewQa>,
    pub key_insights: Vec<String>,
    pub time_breakdown: TimeBreakdown,
    pub summary: String,
}

impl InterviewAnalysis {
    /// Category and selection for the overall score under `cutoff`.
    pub fn verdict(&self, cutoff: u8) -> ScoreVerdict {
        ScoreVerdict::new(self.overall_score, cutoff)
    }
}

/// Seam for the interview analysis engine.
pub trait InterviewAnalyzer: Send + Sync {
    fn analyze(
        &self,
        request: &InterviewAnalysisRequest,
    ) -> Result<InterviewAnalysis, InterviewAnalysisError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InterviewAnalysisError {
    #[error("interview transcript is empty")]
    EmptyTranscript,
    #[error("transcript has no interviewer questions")]
    NoQuestions,
    #[error("interview analysis engine unavailable: {0}")]
    Unavailable(String),
}

/// Deterministic stand-in for a model-backed interview reviewer.
///
/// Splits the transcript into question/answer exchanges and grades each answer by its length,
/// docking hedged replies and non-answers. The technical score averages answer points weighted
/// by confidence (blended with topic coverage when topics are given); communication drops
/// with hedging and terse replies. Overall is 60% technical, 40% communication.
#[derive(Debug, Clone, Copy, Default)]
pub struct TranscriptAnalyzer;

impl InterviewAnalyzer for TranscriptAnalyzer {
    fn analyze(
        &self,
        request: &InterviewAnalysisRequest,
    ) -> Result<InterviewAnalysis, InterviewAnalysisError> {
        if request.transcript.trim().is_empty() {
            return Err(InterviewAnalysisError::EmptyTranscript);
        }

        let exchanges = pair_exchanges(parse_turns(&request.transcript));
        if exchanges.is_empty() {
            return Err(InterviewAnalysisError::NoQuestions);
        }

        let graded: Vec<GradedAnswer> = exchanges.iter().map(grade).collect();
        let asked = graded.len() as f64;

        let accuracy_score = graded.iter().map(|answer| answer.technical).sum::<f64>() / asked;
        let spoken = normalize(
            &exchanges
                .iter()
                .map(|exchange| exchange.answer.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        );
        let coverage = TopicCoverage::measure(&request.expected_topics, &spoken);
        let technical = match &coverage {
            Some(coverage) => {
                (1.0 - TOPIC_WEIGHT) * accuracy_score + TOPIC_WEIGHT * coverage.percent()
            }
            None => accuracy_score,
        };
        let communication =
            graded.iter().map(|answer| answer.communication).sum::<f64>() / asked;
        let overall = TECHNICAL_WEIGHT * technical + (1.0 - TECHNICAL_WEIGHT) * communication;
        let confidence = graded.iter().map(|answer| answer.confidence).sum::<f64>() / asked;

        let overall_score = percent(overall);
        let technical_score = percent(technical);
        let communication_score = percent(communication);
        let category = classify(i32::from(overall_score));

        let key_insights = insights(&exchanges, &graded, coverage.as_ref());
        let answered = graded.iter().filter(|answer| answer.words > 0).count();
        let name = match request.candidate_name.trim() {
            "" => "The candidate",
            name => name,
        };
        let summary = format!(
            "{name} answered {answered} of {} questions. Technical {technical_score}%, \
             communication {communication_score}%, overall {overall_score}% ({}).",
            graded.len(),
            category.label(),
        );

        Ok(InterviewAnalysis {
            overall_score,
            confidence: (confidence * 100.0).round() / 100.0,
            communication_score,
            technical_score,
            category,
            transcript: request.transcript.clone(),
            sentiment: sentiment(&exchanges),
            qa_pairs: exchanges
                .iter()
                .zip(&graded)
                .map(|(exchange, answer)| InterviewQa {
                    question: exchange.question.clone(),
                    answer: exchange.answer.clone(),
                    confidence: answer.confidence,
                    accuracy: answer.accuracy,
                })
                .collect(),
            key_insights,
            time_breakdown: time_breakdown(&exchanges),
            summary,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Speaker {
    Interviewer,
    Candidate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Exchange {
    question: String,
    answer: String,
}

struct GradedAnswer {
    words: usize,
    hedges: usize,
    accuracy: AnswerAccuracy,
    confidence: f64,
    technical: f64,
    communication: f64,
}

struct TopicCoverage {
    covered: usize,
    missing: Vec<String>,
}

impl TopicCoverage {
    fn measure(topics: &[String], spoken: &str) -> Option<Self> {
        let mut seen: Vec<String> = Vec::new();
        let mut coverage = TopicCoverage {
            covered: 0,
            missing: Vec::new(),
        };
        for topic in topics.iter().map(|topic| topic.trim()) {
            let key = topic.to_lowercase();
            if key.is_empty() || seen.contains(&key) {
                continue;
            }
            if count_mentions(spoken, &key) > 0 {
                coverage.covered += 1;
            } else {
                coverage.missing.push(topic.to_string());
            }
            seen.push(key);
        }
        (!seen.is_empty()).then_some(coverage)
    }

    fn total(&self) -> usize {
        self.covered + self.missing.len()
    }

    fn percent(&self) -> f64 {
        100.0 * self.covered as f64 / self.total() as f64
    }
}

/// `Speaker: text` starts a turn; any other line continues the previous one.
fn parse_turns(transcript: &str) -> Vec<(Speaker, String)> {
    let mut turns: Vec<(Speaker, String)> = Vec::new();
    for line in transcript.lines().map(str::trim).filter(|line| !line.is_empty()) {
        match speaker_label(line) {
            Some((speaker, text)) => turns.push((speaker, text.to_string())),
            None => match turns.last_mut() {
                Some((_, text)) => append(text, line),
                None => turns.push((Speaker::Candidate, line.to_string())),
            },
        }
    }
    turns
}

fn speaker_label(line: &str) -> Option<(Speaker, &str)> {
    let (label, rest) = line.split_once(':')?;
    let label = label.trim();
    let plausible = !label.is_empty()
        && label.split_whitespace().count() <= 3
        && label
            .chars()
            .all(|c| c.is_alphabetic() || c == ' ' || c == '.' || c == '-');
    if !plausible {
        return None;
    }

    let lowered = label.to_lowercase();
    let speaker = if INTERVIEWER_LABELS.contains(&lowered.as_str()) || lowered.starts_with("interviewer")
    {
        Speaker::Interviewer
    } else {
        Speaker::Candidate
    };
    Some((speaker, rest.trim()))
}

/// Consecutive interviewer turns merge into one question; candidate talk before the first
/// question is dropped.
fn pair_exchanges(turns: Vec<(Speaker, String)>) -> Vec<Exchange> {
    let mut exchanges: Vec<Exchange> = Vec::new();
    for (speaker, text) in turns {
        match (speaker, exchanges.last_mut()) {
            (Speaker::Interviewer, Some(last)) if last.answer.is_empty() => {
                append(&mut last.question, &text)
            }
            (Speaker::Interviewer, _) => exchanges.push(Exchange {
                question: text,
                answer: String::new(),
            }),
            (Speaker::Candidate, Some(last)) => append(&mut last.answer, &text),
            (Speaker::Candidate, None) => {}
        }
    }
    exchanges
}

fn append(target: &mut String, text: &str) {
    if text.is_empty() {
        return;
    }
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(text);
}

fn normalize(text: &str) -> String {
    text.to_lowercase().replace('\u{2019}', "'")
}

fn mentions_any(haystack: &str, needles: &[&str]) -> bool {
    needles
        .iter()
        .any(|needle| count_mentions(haystack, needle) > 0)
}

fn grade(exchange: &Exchange) -> GradedAnswer {
    let lowered = normalize(&exchange.answer);
    let words = exchange.answer.split_whitespace().count();
    let hedges: usize = HEDGES
        .iter()
        .map(|hedge| count_mentions(&lowered, hedge))
        .sum();

    let accuracy = if words == 0 || mentions_any(&lowered, &NON_ANSWERS) {
        AnswerAccuracy::Incorrect
    } else if words >= COMPLETE_ANSWER_WORDS {
        AnswerAccuracy::Correct
    } else {
        AnswerAccuracy::Partial
    };

    let (confidence, communication) = if words == 0 {
        (0.0, 0.0)
    } else {
        let confidence =
            (1.0 - HEDGE_CONFIDENCE_PENALTY * hedges as f64).max(MIN_ANSWER_CONFIDENCE);
        let mut communication = 100.0 - HEDGE_COMMUNICATION_PENALTY * hedges as f64;
        if words < TERSE_ANSWER_WORDS {
            communication -= TERSE_COMMUNICATION_PENALTY;
        }
        (confidence, communication.clamp(0.0, 100.0))
    };

    GradedAnswer {
        words,
        hedges,
        accuracy,
        confidence,
        technical: accuracy.points() * confidence,
        communication,
    }
}

fn insights(
    exchanges: &[Exchange],
    graded: &[GradedAnswer],
    coverage: Option<&TopicCoverage>,
) -> Vec<String> {
    let asked = graded.len();
    let complete = graded
        .iter()
        .filter(|answer| answer.accuracy == AnswerAccuracy::Correct)
        .count();
    let mut insights = vec![format!(
        "{complete} of {asked} answers were complete and on topic"
    )];

    let hedged = graded.iter().filter(|answer| answer.hedges > 0).count();
    if hedged > 0 {
        insights.push(format!("Hedging language in {hedged} of {asked} answers"));
    }
    let unanswered = graded.iter().filter(|answer| answer.words == 0).count();
    if unanswered > 0 {
        insights.push(format!("{unanswered} of {asked} questions went unanswered"));
    }

    let weakest = exchanges
        .iter()
        .zip(graded)
        .min_by(|(_, a), (_, b)| a.technical.total_cmp(&b.technical));
    if let Some((exchange, answer)) = weakest {
        if answer.technical < AnswerAccuracy::Correct.points() {
            insights.push(format!("Weakest answer: \"{}\"", exchange.question));
        }
    }

    if let Some(coverage) = coverage {
        let mut line = format!(
            "Covered {} of {} expected topics",
            coverage.covered,
            coverage.total()
        );
        if !coverage.missing.is_empty() {
            line.push_str(&format!("; missing {}", coverage.missing.join(", ")));
        }
        insights.push(line);
    }
    insights
}

/// Tone per candidate sentence: positive or negative when only that kind of word appears,
/// neutral otherwise.
fn sentiment(exchanges: &[Exchange]) -> SentimentBreakdown {
    let (mut positive, mut neutral, mut negative) = (0, 0, 0);
    let sentences = exchanges
        .iter()
        .flat_map(|exchange| exchange.answer.split(|c: char| matches!(c, '.' | '!' | '?')))
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty());
    for sentence in sentences {
        let lowered = normalize(sentence);
        match (
            mentions_any(&lowered, &POSITIVE_WORDS),
            mentions_any(&lowered, &NEGATIVE_WORDS),
        ) {
            (true, false) => positive += 1,
            (false, true) => negative += 1,
            _ => neutral += 1,
        }
    }

    if positive + neutral + negative == 0 {
        return SentimentBreakdown {
            positive: 0,
            neutral: 100,
            negative: 0,
        };
    }
    let [positive, neutral, negative] = apportion([positive, neutral, negative]);
    SentimentBreakdown {
        positive,
        neutral,
        negative,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Introduction,
    Technical,
    Behavioral,
    Questions,
    Closing,
}

fn section_of(question: &str) -> Section {
    let lowered = normalize(question);
    if cued(&lowered, &CLOSING_CUES) {
        Section::Closing
    } else if cued(&lowered, &QUESTIONS_CUES) {
        Section::Questions
    } else if cued(&lowered, &INTRODUCTION_CUES) {
        Section::Introduction
    } else if cued(&lowered, &BEHAVIORAL_CUES) {
        Section::Behavioral
    } else {
        Section::Technical
    }
}

fn cued(text: &str, cues: &[&str]) -> bool {
    cues.iter().any(|cue| text.contains(cue))
}

fn time_breakdown(exchanges: &[Exchange]) -> TimeBreakdown {
    let mut words = [0usize; 5];
    for exchange in exchanges {
        let slot = match section_of(&exchange.question) {
            Section::Introduction => 0,
            Section::Technical => 1,
            Section::Behavioral => 2,
            Section::Questions => 3,
            Section::Closing => 4,
        };
        words[slot] += exchange.question.split_whitespace().count()
            + exchange.answer.split_whitespace().count();
    }

    let [introduction, technical, behavioral, questions, closing] = apportion(words);
    TimeBreakdown {
        introduction,
        technical,
        behavioral,
        questions,
        closing,
    }
}

/// Whole percentages summing to 100 (largest remainder); all zero when every weight is.
fn apportion<const N: usize>(weights: [usize; N]) -> [u8; N] {
    let mut shares = [0u8; N];
    let total: usize = weights.iter().sum();
    if total == 0 {
        return shares;
    }

    let mut assigned = 0;
    let mut remainders: Vec<(usize, usize)> = Vec::with_capacity(N);
    for (slot, weight) in weights.iter().enumerate() {
        let scaled = weight * 100;
        let share = scaled / total;
        shares[slot] = u8::try_from(share).unwrap_or(100);
        assigned += share;
        remainders.push((scaled % total, slot));
    }

    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for (_, slot) in remainders.into_iter().take(100 - assigned) {
        shares[slot] += 1;
    }
    shares
}

fn percent(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
