use uuid::Uuid;

use crate::models::{
    domain::{AttemptRecord, PerformanceBand, TimeEfficiency},
    dto::response::{round_one_decimal, AssessmentReport, BandCount, QuizStatistics},
};

/// Derives the assessment shown after an attempt. Pure: the same record
/// always yields the same report.
pub fn generate_assessment_report(record: &AttemptRecord) -> AssessmentReport {
    let percentage = record.percentage();
    let band = PerformanceBand::from_percentage(percentage);
    let time_efficiency = TimeEfficiency::from_minutes(record.time_spent);

    AssessmentReport {
        attempt_id: record.id,
        quiz_title: record.quiz_title.clone(),
        student_name: record.student_name.clone(),
        score: record.score,
        total_points: record.total_points,
        percentage: round_one_decimal(percentage),
        band,
        performance: band.label().to_string(),
        recommendation: band.recommendation().to_string(),
        time_spent: record.time_spent,
        time_efficiency,
        time_efficiency_label: time_efficiency.label().to_string(),
        pending_review: record.pending_review(),
    }
}

pub fn compute_quiz_statistics(quiz_id: Uuid, records: &[AttemptRecord]) -> QuizStatistics {
    let attempts = records.len() as u32;

    let (average_score, average_percentage) = if records.is_empty() {
        (0.0, 0.0)
    } else {
        let count = f64::from(attempts);
        let score_sum: f64 = records.iter().map(|r| f64::from(r.score)).sum();
        let percentage_sum: f64 = records.iter().map(|r| r.percentage()).sum();
        (
            round_one_decimal(score_sum / count),
            round_one_decimal(percentage_sum / count),
        )
    };

    let band_distribution = PerformanceBand::ALL
        .iter()
        .map(|band| BandCount {
            band: *band,
            count: records
                .iter()
                .filter(|r| PerformanceBand::from_percentage(r.percentage()) == *band)
                .count() as u32,
        })
        .collect();

    QuizStatistics {
        quiz_id,
        attempts,
        average_score,
        average_percentage,
        highest_score: records.iter().map(|r| r.score).max(),
        lowest_score: records.iter().map(|r| r.score).min(),
        band_distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn record(score: u32, total_points: u32, time_spent: u32) -> AttemptRecord {
        let now = Utc::now();
        AttemptRecord {
            id: Uuid::new_v4(),
            quiz_id: Uuid::new_v4(),
            quiz_title: "Error handling".to_string(),
            student_id: "s-1".to_string(),
            student_name: "Sam".to_string(),
            answers: BTreeMap::new(),
            question_results: Vec::new(),
            score,
            total_points,
            started_at: now,
            completed_at: now,
            time_spent,
        }
    }

    #[test]
    fn test_two_thirds_needs_improvement() {
        let report = generate_assessment_report(&record(10, 15, 5));

        assert_eq!(report.percentage, 66.7);
        assert_eq!(report.band, PerformanceBand::NeedsImprovement);
        assert_eq!(report.performance, "Needs Improvement");
        assert_eq!(report.time_efficiency, TimeEfficiency::Efficient);
    }

    #[test]
    fn test_full_marks_excellent() {
        let report = generate_assessment_report(&record(15, 15, 25));

        assert_eq!(report.percentage, 100.0);
        assert_eq!(report.band, PerformanceBand::Excellent);
        assert_eq!(report.recommendation, PerformanceBand::Excellent.recommendation());
        assert_eq!(report.time_efficiency_label, "Needs more time management");
    }

    #[test]
    fn test_band_uses_unrounded_percentage() {
        // 89.97% displays as 90.0 but stays below the Excellent threshold.
        let report = generate_assessment_report(&record(8997, 10000, 0));

        assert_eq!(report.percentage, 90.0);
        assert_eq!(report.band, PerformanceBand::Good);
    }

    #[test]
    fn test_zero_point_quiz_reports_zero_percent() {
        let report = generate_assessment_report(&record(0, 0, 0));

        assert_eq!(report.percentage, 0.0);
        assert_eq!(report.band, PerformanceBand::NeedsImprovement);
    }

    #[test]
    fn test_report_is_deterministic() {
        let record = record(12, 15, 19);

        assert_eq!(
            generate_assessment_report(&record),
            generate_assessment_report(&record)
        );
    }

    #[test]
    fn test_statistics_over_attempts() {
        let quiz_id = Uuid::new_v4();
        let records = vec![record(15, 15, 3), record(10, 15, 4), record(13, 15, 5)];

        let stats = compute_quiz_statistics(quiz_id, &records);

        assert_eq!(stats.attempts, 3);
        assert_eq!(stats.average_score, 12.7);
        assert_eq!(stats.highest_score, Some(15));
        assert_eq!(stats.lowest_score, Some(10));
        let excellent = stats
            .band_distribution
            .iter()
            .find(|b| b.band == PerformanceBand::Excellent)
            .unwrap();
        assert_eq!(excellent.count, 1);
        let good = stats
            .band_distribution
            .iter()
            .find(|b| b.band == PerformanceBand::Good)
            .unwrap();
        assert_eq!(good.count, 1);
    }

    #[test]
    fn test_statistics_without_attempts() {
        let stats = compute_quiz_statistics(Uuid::new_v4(), &[]);

        assert_eq!(stats.attempts, 0);
        assert_eq!(stats.average_percentage, 0.0);
        assert_eq!(stats.highest_score, None);
        assert_eq!(stats.band_distribution.len(), 4);
    }
}
