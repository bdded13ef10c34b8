// Storefront Core - Bookstore catalog, inquiry and quiz client
// Copyright (C) 2025 Storefront Core contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! Quizzes API
//!
//! # API Endpoints
//! - `GET /quizzes?subject=&grade=&search=` - `{quizzes: [...]}` or a bare array
//! - `GET /quizzes/{id}`
//! - `GET /quizzes/subjects`, `GET /quizzes/grades` - string arrays
//! - `POST /quizzes/{id}/attempts` - `{answers: [...]}` -> scored result
//! - `GET /quizzes/my-attempts` - the current user's attempt history

use crate::api::client::{from_value, StorefrontClient};
use crate::catalog::query::is_unset;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: i64,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub subject: Option<String>,

    #[serde(default)]
    pub grade: Option<String>,

    /// Minutes
    #[serde(default)]
    pub time_limit: Option<u32>,

    /// Percent needed to pass, when the quiz defines one
    #[serde(default)]
    pub passing_score: Option<f64>,

    #[serde(default)]
    pub is_active: bool,

    #[serde(default)]
    pub total_questions: Option<u32>,

    /// Question payloads are rendered by the quiz player and kept opaque here
    #[serde(default)]
    pub questions: Vec<Value>,

    #[serde(default)]
    pub created_at: Option<String>,
}

/// Quiz list filters; `all` or blank means "no filter"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizFilters {
    pub subject: Option<String>,
    pub grade: Option<String>,
    pub search: Option<String>,
}

impl QuizFilters {
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if !is_unset(self.subject.as_deref()) {
            if let Some(subject) = &self.subject {
                pairs.push(("subject", subject.clone()));
            }
        }
        if !is_unset(self.grade.as_deref()) {
            if let Some(grade) = &self.grade {
                pairs.push(("grade", grade.clone()));
            }
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }

        pairs
    }
}

/// One submitted answer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswer {
    pub question_id: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_answer_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_text: Option<String>,
}

/// A scored attempt at a quiz
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub quiz_id: Option<i64>,

    #[serde(default)]
    pub quiz_title: Option<String>,

    #[serde(default)]
    pub user_id: Option<Value>,

    #[serde(default)]
    pub score: Option<f64>,

    #[serde(default)]
    pub total_questions: Option<u32>,

    #[serde(default)]
    pub percentage: f64,

    #[serde(default)]
    pub passing_score: Option<f64>,

    /// Server verdict, when it sends one
    #[serde(default)]
    pub is_passed: Option<bool>,

    #[serde(default)]
    pub completed_at: Option<String>,
}

impl QuizResult {
    /// Server verdict if present, else `percentage >= passing_score`
    ///
    /// `quiz_passing_score` is used when the result itself does not carry one.
    pub fn passed(&self, quiz_passing_score: Option<f64>) -> bool {
        if let Some(passed) = self.is_passed {
            return passed;
        }
        match self.passing_score.or(quiz_passing_score) {
            Some(threshold) => self.percentage >= threshold,
            None => false,
        }
    }
}

/// String array responses; anything else reads as empty
fn string_list(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

impl StorefrontClient {
    /// Quizzes matching the filters
    ///
    /// Accepts `{quizzes: [...]}` or a bare array; any other shape reads as no quizzes.
    pub async fn get_quizzes(&self, filters: &QuizFilters) -> Result<Vec<Quiz>> {
        let value: Value = self.get_with_query("/quizzes", &filters.to_query_pairs()).await?;

        match value {
            Value::Array(_) => from_value(value),
            Value::Object(mut map) => match map.remove("quizzes") {
                Some(list @ Value::Array(_)) => from_value(list),
                _ => Ok(Vec::new()),
            },
            _ => Ok(Vec::new()),
        }
    }

    pub async fn get_quiz(&self, id: i64) -> Result<Quiz> {
        self.get(&format!("/quizzes/{}", id)).await
    }

    pub async fn get_quiz_subjects(&self) -> Result<Vec<String>> {
        let value: Value = self.get("/quizzes/subjects").await?;
        Ok(string_list(value))
    }

    pub async fn get_quiz_grades(&self) -> Result<Vec<String>> {
        let value: Value = self.get("/quizzes/grades").await?;
        Ok(string_list(value))
    }

    /// Submit answers and get the scored result
    pub async fn submit_quiz_attempt(&self, quiz_id: i64, answers: &[QuizAnswer]) -> Result<QuizResult> {
        self.post(
            &format!("/quizzes/{}/attempts", quiz_id),
            &json!({ "answers": answers }),
        )
        .await
    }

    /// Attempt history of the logged-in user
    pub async fn get_my_attempts(&self) -> Result<Vec<QuizResult>> {
        self.get("/quizzes/my-attempts").await
    }
}
