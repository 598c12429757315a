//! Input validation for batch workloads.
//!
//! Checks raw job parameters before they reach the simulator. Detects:
//! - Negative arrival times
//! - Non-positive cores, memory, or duration
//! - Values too large for the job model
//!
//! All problems are collected, so a caller can report every bad job at
//! once. Jobs that exceed every node's capacity are a property of the
//! workload *and* the pool and are rejected by the simulator itself.

use thiserror::Error;

use crate::models::{Job, JobId, JobSpec};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending job (1-based position in the input).
    pub job_id: JobId,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Arrival time below zero.
    NegativeArrival,
    /// Cores required is zero or negative.
    NonPositiveCores,
    /// Memory required is zero or negative.
    NonPositiveMemory,
    /// Duration is zero or negative.
    NonPositiveDuration,
    /// A value does not fit the job model's integer range.
    ValueOutOfRange,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, job_id: JobId, message: impl Into<String>) -> Self {
        Self {
            kind,
            job_id,
            message: message.into(),
        }
    }
}

/// Validates raw job parameters.
///
/// Checks, for each job:
/// 1. Arrival time ≥ 0
/// 2. Cores, memory, duration > 0
/// 3. Cores and memory fit in `u32`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_jobs(specs: &[JobSpec]) -> ValidationResult {
    let mut errors = Vec::new();

    for (job_id, spec) in (1..).zip(specs) {
        check_spec(job_id, spec, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates raw parameters and builds jobs with 1-based ids in input order.
///
/// # Example
/// ```
/// use u_batchsim::models::JobSpec;
/// use u_batchsim::validation::build_jobs;
///
/// let jobs = build_jobs(&[JobSpec::new(0, 4, 8, 5)]).unwrap();
/// assert_eq!(jobs[0].id(), 1);
/// assert!(build_jobs(&[JobSpec::new(-1, 4, 8, 5)]).is_err());
/// ```
pub fn build_jobs(specs: &[JobSpec]) -> Result<Vec<Job>, Vec<ValidationError>> {
    validate_jobs(specs)?;

    // Ranges were checked above, so the conversions cannot fail here.
    let jobs = (1..)
        .zip(specs)
        .filter_map(|(job_id, spec)| {
            Some(Job::new(
                job_id,
                u64::try_from(spec.arrival_time).ok()?,
                u32::try_from(spec.cores).ok()?,
                u32::try_from(spec.memory_gb).ok()?,
                u64::try_from(spec.duration).ok()?,
            ))
        })
        .collect();
    Ok(jobs)
}

fn check_spec(job_id: JobId, spec: &JobSpec, errors: &mut Vec<ValidationError>) {
    if spec.arrival_time < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NegativeArrival,
            job_id,
            format!("Job {job_id} has negative arrival time {}", spec.arrival_time),
        ));
    }

    check_amount(
        job_id,
        "cores",
        spec.cores,
        ValidationErrorKind::NonPositiveCores,
        errors,
    );
    check_amount(
        job_id,
        "memory",
        spec.memory_gb,
        ValidationErrorKind::NonPositiveMemory,
        errors,
    );

    if spec.duration <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveDuration,
            job_id,
            format!("Job {job_id} has non-positive duration {}", spec.duration),
        ));
    }
}

fn check_amount(
    job_id: JobId,
    what: &str,
    value: i64,
    non_positive: ValidationErrorKind,
    errors: &mut Vec<ValidationError>,
) {
    if value <= 0 {
        errors.push(ValidationError::new(
            non_positive,
            job_id,
            format!("Job {job_id} requires non-positive {what} {value}"),
        ));
    } else if u32::try_from(value).is_err() {
        errors.push(ValidationError::new(
            ValidationErrorKind::ValueOutOfRange,
            job_id,
            format!("Job {job_id} {what} {value} exceeds {}", u32::MAX),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_specs() -> Vec<JobSpec> {
        vec![
            JobSpec::new(0, 4, 8, 5),
            JobSpec::new(3, 20, 60, 1),
            JobSpec::new(3, 1, 1, 100),
        ]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_jobs(&sample_specs()).is_ok());
    }

    #[test]
    fn test_build_assigns_one_based_ids() {
        let jobs = build_jobs(&sample_specs()).unwrap();
        let ids: Vec<JobId> = jobs.iter().map(|j| j.id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(jobs[1].cores(), 20);
        assert_eq!(jobs[1].memory_gb(), 60);
        assert_eq!(jobs[2].duration(), 100);
    }

    #[test]
    fn test_negative_arrival() {
        let errors = validate_jobs(&[JobSpec::new(-3, 1, 1, 1)]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::NegativeArrival);
        assert_eq!(errors[0].job_id, 1);
    }

    #[test]
    fn test_zero_cores() {
        let errors = validate_jobs(&[JobSpec::new(0, 0, 1, 1)]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NonPositiveCores));
    }

    #[test]
    fn test_negative_memory() {
        let errors = validate_jobs(&[JobSpec::new(0, 1, -8, 1)]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NonPositiveMemory && e.message.contains("memory")));
    }

    #[test]
    fn test_zero_duration() {
        let errors = validate_jobs(&[JobSpec::new(0, 1, 1, 0)]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NonPositiveDuration));
    }

    #[test]
    fn test_out_of_range() {
        let errors = validate_jobs(&[JobSpec::new(0, i64::from(u32::MAX) + 1, 1, 1)]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::ValueOutOfRange);
    }

    #[test]
    fn test_multiple_errors() {
        let specs = vec![
            JobSpec::new(0, 4, 8, 5),
            JobSpec::new(-1, 0, 0, 0), // Four problems
            JobSpec::new(0, 1, 1, -2),
        ];
        let errors = validate_jobs(&specs).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.iter().filter(|e| e.job_id == 2).count() == 4);
        assert!(errors.iter().any(|e| e.job_id == 3));
    }

    #[test]
    fn test_build_rejects_invalid() {
        assert!(build_jobs(&[JobSpec::new(0, 1, 1, 0)]).is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(validate_jobs(&[]).is_ok());
        assert!(build_jobs(&[]).unwrap().is_empty());
    }
}
