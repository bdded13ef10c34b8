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


//! Quiz listing and attempt outcomes
//!
//! [`QuizBoard`] is the quizzes page: filters, the fetched list, the filter
//! option lists and the quiz currently being taken. Questions and the timer
//! belong to the quiz player; this side only starts a quiz and reports how
//! the finished attempt went.
//!
//! Filters are sent to the server and applied again locally, so a server that
//! ignores them still yields a correctly filtered list.

use crate::api::client::StorefrontClient;
use crate::api::quizzes::{Quiz, QuizFilters, QuizResult};
use crate::catalog::query::is_unset;
use crate::error::{Result, StorefrontError};
use futures_util::future::try_join;

/// Built-in subject options, shown even when the server has none
pub const DEFAULT_SUBJECTS: [&str; 8] = [
    "الرياضيات",
    "العلوم",
    "اللغة العربية",
    "اللغة الإنجليزية",
    "الدراسات الاجتماعية",
    "التربية الإسلامية",
    "الحاسوب",
    "الفنون",
];

/// Built-in grade options, first to twelfth
pub const DEFAULT_GRADES: [&str; 12] = [
    "الصف الأول",
    "الصف الثاني",
    "الصف الثالث",
    "الصف الرابع",
    "الصف الخامس",
    "الصف السادس",
    "الصف السابع",
    "الصف الثامن",
    "الصف التاسع",
    "الصف العاشر",
    "الصف الحادي عشر",
    "الصف الثاني عشر",
];

/// `base` followed by the new entries of `extra`, first occurrence wins
pub fn merge_unique<S: AsRef<str>>(base: &[S], extra: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(base.len() + extra.len());
    for item in base.iter().map(AsRef::as_ref).chain(extra.iter().map(String::as_str)) {
        if !merged.iter().any(|m| m == item) {
            merged.push(item.to_string());
        }
    }
    merged
}

/// Local filter: case-insensitive title match, exact subject and grade
pub fn filter_quizzes(quizzes: &[Quiz], filters: &QuizFilters) -> Vec<Quiz> {
    let search = filters
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    quizzes
        .iter()
        .filter(|q| match &search {
            Some(term) => q.title.to_lowercase().contains(term.as_str()),
            None => true,
        })
        .filter(|q| {
            is_unset(filters.subject.as_deref()) || q.subject.as_deref() == filters.subject.as_deref()
        })
        .filter(|q| is_unset(filters.grade.as_deref()) || q.grade.as_deref() == filters.grade.as_deref())
        .cloned()
        .collect()
}

/// Subject and grade option lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    pub subjects: Vec<String>,
    pub grades: Vec<String>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            subjects: DEFAULT_SUBJECTS.iter().map(|s| s.to_string()).collect(),
            grades: DEFAULT_GRADES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl FilterOptions {
    /// Defaults merged with the server lists; defaults alone if either request fails
    pub async fn load(client: &StorefrontClient) -> Self {
        match try_join(client.get_quiz_subjects(), client.get_quiz_grades()).await {
            Ok((subjects, grades)) => Self {
                subjects: merge_unique(&DEFAULT_SUBJECTS, &subjects),
                grades: merge_unique(&DEFAULT_GRADES, &grades),
            },
            Err(e) => {
                tracing::warn!(error = %e, "quiz filter options unavailable, using defaults");
                Self::default()
            }
        }
    }
}

/// How a finished attempt went
#[derive(Debug, Clone, PartialEq)]
pub struct QuizOutcome {
    pub passed: bool,
    pub percentage: f64,
}

impl QuizOutcome {
    pub fn from_result(result: &QuizResult, quiz_passing_score: Option<f64>) -> Self {
        Self {
            passed: result.passed(quiz_passing_score),
            percentage: result.percentage,
        }
    }

    /// Toast text, percentage to one decimal
    pub fn message(&self) -> String {
        if self.passed {
            format!("مبروك! لقد نجحت في الكويز بنسبة {:.1}%", self.percentage)
        } else {
            format!("للأسف لم تنجح في الكويز. النسبة المحققة: {:.1}%", self.percentage)
        }
    }
}

/// Quizzes page state
#[derive(Debug, Clone)]
pub struct QuizBoard {
    client: StorefrontClient,
    filters: QuizFilters,
    quizzes: Vec<Quiz>,
    options: FilterOptions,
    selected: Option<Quiz>,
}

impl QuizBoard {
    pub fn new(client: StorefrontClient) -> Self {
        Self {
            client,
            filters: QuizFilters::default(),
            quizzes: Vec::new(),
            options: FilterOptions::default(),
            selected: None,
        }
    }

    pub fn filters(&self) -> &QuizFilters {
        &self.filters
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Quiz being taken, if any
    pub fn selected(&self) -> Option<&Quiz> {
        self.selected.as_ref()
    }

    /// Fetched quizzes with the filters applied locally
    pub fn visible(&self) -> Vec<Quiz> {
        filter_quizzes(&self.quizzes, &self.filters)
    }

    /// Fetch the list for the current filters; a failure empties it
    pub async fn load(&mut self) -> Result<()> {
        match self.client.get_quizzes(&self.filters).await {
            Ok(quizzes) => {
                self.quizzes = quizzes;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "quiz list load failed");
                self.quizzes.clear();
                Err(e)
            }
        }
    }

    pub async fn load_options(&mut self) {
        self.options = FilterOptions::load(&self.client).await;
    }

    /// Replace the filters and refetch
    pub async fn set_filters(&mut self, filters: QuizFilters) -> Result<()> {
        self.filters = filters;
        self.load().await
    }

    /// Select a quiz to take; inactive quizzes cannot be started
    pub fn start(&mut self, quiz_id: i64) -> Result<&Quiz> {
        let quiz = self
            .quizzes
            .iter()
            .find(|q| q.id == quiz_id)
            .ok_or_else(|| StorefrontError::invalid_input(format!("Unknown quiz: {}", quiz_id)))?;

        if !quiz.is_active {
            return Err(StorefrontError::invalid_input(format!("Quiz {} is not active", quiz_id)));
        }

        Ok(self.selected.insert(quiz.clone()))
    }

    /// Leave the quiz without finishing
    pub fn back(&mut self) {
        self.selected = None;
    }

    /// Finish the selected quiz: report the outcome and refresh the list
    ///
    /// A failed refresh is logged; the outcome is still returned.
    pub async fn complete(&mut self, result: &QuizResult) -> QuizOutcome {
        let passing_score = self.selected.take().and_then(|q| q.passing_score);
        let outcome = QuizOutcome::from_result(result, passing_score);

        if let Err(e) = self.load().await {
            tracing::warn!(error = %e, "quiz list refresh after attempt failed");
        }

        outcome
    }
}
