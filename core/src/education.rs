//! Education actions: enrolling in courses at the daycare and studying
//! toward the next level.
//!
//! Study counts once per day per course; finishing a level grants the
//! course's skill and resets progress for the next level. Enrollment is
//! permanent, levels are uncapped.

use crate::{
    action::ActionOutcome,
    config::{CourseSkill, GameConfig},
    event::GameEvent,
    state::{Enrollment, GameState},
};

const STUDY_ENERGY_COST: i64 = 10;
const STUDY_PROGRESS_GAIN: i64 = 20;
const LEVEL_SKILL_GAIN: i64 = 5;

/// Enroll in a course. Free, but only offered at the daycare.
pub fn enroll(state: &mut GameState, config: &GameConfig, course: &str) -> ActionOutcome {
    if state.location != "Creche" {
        return ActionOutcome::rejected("Courses are taught at the daycare.");
    }
    if config.course(course).is_none() {
        return ActionOutcome::rejected(format!("There is no course called {course}."));
    }
    if state.education.enrollments.iter().any(|e| e.course == course) {
        return ActionOutcome::rejected(format!("You are already enrolled in {course}."));
    }
    state.education.enrollments.push(Enrollment {
        course: course.to_string(),
        progress: 0,
        level: 0,
        last_study_day: None,
    });
    ActionOutcome::applied(
        Vec::new(),
        vec![format!("Enrolled in {course}.")],
    )
}

/// Study an enrolled course. One session per course per day.
pub fn study(state: &mut GameState, config: &GameConfig, course: &str) -> ActionOutcome {
    if state.location != "Creche" {
        return ActionOutcome::rejected("Studying happens at the daycare.");
    }
    let Some(spec) = config.course(course) else {
        return ActionOutcome::rejected(format!("There is no course called {course}."));
    };
    let day = state.calendar.day_count;
    let Some(index) = state
        .education
        .enrollments
        .iter()
        .position(|e| e.course == course)
    else {
        return ActionOutcome::rejected(format!("You are not enrolled in {course}."));
    };
    if state.education.enrollments[index].last_study_day == Some(day) {
        return ActionOutcome::rejected("You already studied that today.");
    }
    if !state.character.try_spend_energy(STUDY_ENERGY_COST) {
        return ActionOutcome::rejected("You are too tired to study.");
    }

    let enrollment = &mut state.education.enrollments[index];
    enrollment.last_study_day = Some(day);
    enrollment.progress += STUDY_PROGRESS_GAIN;
    if enrollment.progress < 100 {
        let progress = enrollment.progress;
        return ActionOutcome::applied(
            Vec::new(),
            vec![format!("Study session done: {progress}% of the level.")],
        );
    }

    enrollment.progress = 0;
    enrollment.level += 1;
    let level = enrollment.level;
    let skill = match spec.skill {
        CourseSkill::Farming => &mut state.trade.farming_skill,
        CourseSkill::Trading => &mut state.trade.trading_skill,
        CourseSkill::Social => &mut state.trade.social_skill,
    };
    *skill += LEVEL_SKILL_GAIN;
    ActionOutcome::applied(
        vec![GameEvent::CourseCompleted {
            day_count: day,
            course: course.to_string(),
            level,
        }],
        Vec::new(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> (GameState, GameConfig) {
        let mut state = GameState::new_run();
        state.location = "Creche".to_string();
        (state, GameConfig::default_test())
    }

    #[test]
    fn enroll_needs_daycare_and_known_course() {
        let (mut state, config) = student();
        state.location = "Parque".to_string();
        assert!(!enroll(&mut state, &config, "Agricultura Básica").is_applied());

        state.location = "Creche".to_string();
        assert!(!enroll(&mut state, &config, "Alquimia").is_applied());
        assert!(enroll(&mut state, &config, "Agricultura Básica").is_applied());
        assert_eq!(state.education.enrollments.len(), 1);

        // double enrollment is rejected
        assert!(!enroll(&mut state, &config, "Agricultura Básica").is_applied());
        assert_eq!(state.education.enrollments.len(), 1);
    }

    #[test]
    fn study_once_per_day() {
        let (mut state, config) = student();
        state.calendar.day_count = 3;
        enroll(&mut state, &config, "Agricultura Básica");

        assert!(study(&mut state, &config, "Agricultura Básica").is_applied());
        assert_eq!(state.education.enrollments[0].progress, 20);
        assert_eq!(state.character.energy, 90);

        assert!(!study(&mut state, &config, "Agricultura Básica").is_applied());
        assert_eq!(state.education.enrollments[0].progress, 20);

        state.calendar.day_count = 4;
        assert!(study(&mut state, &config, "Agricultura Básica").is_applied());
        assert_eq!(state.education.enrollments[0].progress, 40);
    }

    #[test]
    fn study_requires_enrollment() {
        let (mut state, config) = student();
        assert!(!study(&mut state, &config, "Agricultura Básica").is_applied());
    }

    #[test]
    fn finishing_a_level_grants_the_skill() {
        let (mut state, config) = student();
        enroll(&mut state, &config, "Agricultura Básica");
        state.education.enrollments[0].progress = 80;
        state.calendar.day_count = 9;

        let outcome = study(&mut state, &config, "Agricultura Básica");
        assert!(outcome.is_applied());
        assert_eq!(state.education.enrollments[0].level, 1);
        assert_eq!(state.education.enrollments[0].progress, 0);
        assert_eq!(state.trade.farming_skill, 5);
    }

    #[test]
    fn each_course_feeds_its_own_skill() {
        let (mut state, config) = student();
        enroll(&mut state, &config, "Habilidades Sociais");
        state.education.enrollments[0].progress = 80;
        state.calendar.day_count = 2;
        study(&mut state, &config, "Habilidades Sociais");
        assert_eq!(state.trade.social_skill, 5);
        assert_eq!(state.trade.farming_skill, 0);
    }
}
