//! Feedback string table and template rendering.
//!
//! Grade selection never depends on anything in here. The table only turns a
//! grade and its numbers into prose, so it can be swapped for another
//! language without touching the scoring code.

use serde::{Deserialize, Serialize};

use crate::bander::Grade;
use crate::evaluator::{Evaluation, TextMetrics};
use crate::model::TaskType;
use crate::scorer::QuizScore;

/// One template per grade band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BandTemplates {
    pub sehr_gut: String,
    pub gut: String,
    pub befriedigend: String,
    pub ausreichend: String,
    pub mangelhaft: String,
    pub ungenuegend: String,
}

impl BandTemplates {
    pub fn get(&self, grade: Grade) -> &str {
        match grade {
            Grade::SehrGut => &self.sehr_gut,
            Grade::Gut => &self.gut,
            Grade::Befriedigend => &self.befriedigend,
            Grade::Ausreichend => &self.ausreichend,
            Grade::Mangelhaft => &self.mangelhaft,
            Grade::Ungenuegend => &self.ungenuegend,
        }
    }

    fn quiz_defaults() -> Self {
        Self {
            sehr_gut: "Hervorragend! Du hast {correct} von {total} Fragen richtig beantwortet ({percentage}%). Du beherrschst den Stoff sicher.".into(),
            gut: "Gute Arbeit! {correct} von {total} Fragen richtig ({percentage}%). Nur wenige Details fehlen noch.".into(),
            befriedigend: "Solide Leistung: {correct} von {total} Fragen richtig ({percentage}%). Wiederhole die Themen der falsch beantworteten Fragen.".into(),
            ausreichend: "Bestanden mit {correct} von {total} richtigen Antworten ({percentage}%). Einige Grundlagen solltest du noch einmal durchgehen.".into(),
            mangelhaft: "Nur {correct} von {total} Fragen richtig ({percentage}%). Arbeite das Kapitel erneut durch und versuche es dann noch einmal.".into(),
            ungenuegend: "Leider nur {correct} von {total} Fragen richtig ({percentage}%). Beginne am besten noch einmal mit den Grundlagen des Kapitels.".into(),
        }
    }

    fn free_text_defaults() -> Self {
        Self {
            sehr_gut: "Sehr überzeugende Antwort ({score} von 100 Punkten). Mit {words} Wörtern in {sentences} Sätzen ist sie ausführlich, klar gegliedert und sprachlich abwechslungsreich.".into(),
            gut: "Gute Antwort ({score} von 100 Punkten). {words} Wörter bei durchschnittlich {avg_sentence_length} Wörtern pro Satz. Etwas mehr Tiefe würde sie noch stärker machen.".into(),
            befriedigend: "Ordentliche Antwort ({score} von 100 Punkten). Der Wortschatz ist zu {unique_ratio}% abwechslungsreich. Baue deine Argumente weiter aus.".into(),
            ausreichend: "Deine Antwort erfüllt die Mindestanforderungen ({score} von 100 Punkten). Formuliere ausführlicher und achte auf einen klaren Satzbau.".into(),
            mangelhaft: "Deine Antwort ist noch lückenhaft ({score} von 100 Punkten). Mit {words} Wörtern fehlt es an Umfang und Begründung.".into(),
            ungenuegend: "Deine Antwort reicht so nicht aus ({score} von 100 Punkten). Sie ist zu knapp oder zu wenig ausgearbeitet.".into(),
        }
    }
}

/// The full string table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct FeedbackTemplates {
    /// Quiz path, placeholders `{correct}`, `{total}`, `{percentage}`.
    pub quiz: BandTemplates,
    /// Free-text path, placeholders `{score}`, `{words}`, `{sentences}`,
    /// `{avg_sentence_length}`, `{unique_ratio}`.
    pub free_text: BandTemplates,
    /// Fixed message for answers below the minimum length.
    pub short_answer: String,
    /// Sample solution appended to failing free-text answers on quiz tasks.
    pub sample_solution_quiz: String,
    /// Sample solution appended to failing free-text answers on other tasks.
    pub sample_solution_generic: String,
}

impl Default for FeedbackTemplates {
    fn default() -> Self {
        Self {
            quiz: BandTemplates::quiz_defaults(),
            free_text: BandTemplates::free_text_defaults(),
            short_answer: "Deine Antwort ist zu kurz, um bewertet zu werden. Bitte formuliere eine ausführlichere Antwort mit mindestens einigen vollständigen Sätzen.".into(),
            sample_solution_quiz: "Musterlösung: Eine vollständige Antwort nennt zuerst den zentralen Begriff der Frage, erklärt ihn in eigenen Worten und belegt die Erklärung mit einem konkreten Beispiel aus dem Kursmaterial. Abschließend wird kurz zusammengefasst, warum die Antwort zutrifft.".into(),
            sample_solution_generic: "Musterlösung: Eine gelungene Bearbeitung beginnt mit einer kurzen Einleitung zum Thema, stellt dann die wichtigsten Inhalte strukturiert dar, begründet jede Aussage und schließt mit einem eigenen Fazit. Achte auf vollständige Sätze und verwende die Fachbegriffe aus dem Kurs.".into(),
        }
    }
}

impl FeedbackTemplates {
    /// Feedback for a graded quiz.
    pub fn quiz_feedback(&self, grade: Grade, score: &QuizScore) -> String {
        let correct = score.correct_count.to_string();
        let total = score.total.to_string();
        let percentage = format!("{:.0}", score.percentage);
        render(
            self.quiz.get(grade),
            &[
                ("correct", &correct),
                ("total", &total),
                ("percentage", &percentage),
            ],
        )
    }

    /// Feedback for an evaluated free-text answer.
    ///
    /// Failing grades get the sample solution for `task_type` appended. The
    /// short-answer message is returned on its own.
    pub fn free_text_feedback(&self, evaluation: &Evaluation, task_type: TaskType) -> String {
        let Evaluation::Scored { metrics, points } = evaluation else {
            return self.short_answer.clone();
        };
        let grade = evaluation.grade();
        let body = self.render_free_text(grade, points.total(), metrics);
        if !grade.is_failing() {
            return body;
        }
        let sample = match task_type {
            TaskType::Quiz => &self.sample_solution_quiz,
            _ => &self.sample_solution_generic,
        };
        format!("{body}\n\n{sample}")
    }

    fn render_free_text(&self, grade: Grade, score: u32, metrics: &TextMetrics) -> String {
        let score = score.to_string();
        let words = metrics.word_count.to_string();
        let sentences = metrics.sentence_count.to_string();
        let avg = format!("{:.1}", metrics.average_sentence_length);
        let unique = format!("{:.0}", metrics.unique_words_ratio * 100.0);
        render(
            self.free_text.get(grade),
            &[
                ("score", &score),
                ("words", &words),
                ("sentences", &sentences),
                ("avg_sentence_length", &avg),
                ("unique_ratio", &unique),
            ],
        )
    }
}

/// Substitute `{name}` placeholders. Unknown placeholders are left as-is.
pub fn render(template: &str, params: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match params.iter().find(|(key, _)| *key == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
