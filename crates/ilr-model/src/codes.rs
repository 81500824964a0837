//! ILR code values used across the rule catalog.

/// ULN placeholder used when the learner's real ULN is not yet known.
pub const ULN_TEMPORARY: i64 = 9_999_999_999;

/// LearnAimRef of an apprenticeship or traineeship programme aim.
pub const PROGRAMME_AIM_REF: &str = "ZPROG001";

/// LearnAimRef of a work experience aim.
pub const WORK_EXPERIENCE_AIM_REF: &str = "ZWRKX001";

/// Placeholder delivery postcode for learning outside the UK.
pub const OUTSIDE_UK_POSTCODE: &str = "ZZ99 9ZZ";

pub mod fund_model {
    pub const COMMUNITY_LEARNING: i32 = 10;
    pub const AGE_16_TO_19: i32 = 25;
    pub const ADULT_SKILLS: i32 = 35;
    pub const APPRENTICESHIPS: i32 = 36;
    pub const EUROPEAN_SOCIAL_FUND: i32 = 70;
    pub const OTHER_ADULT: i32 = 81;
    pub const OTHER_16_TO_19: i32 = 82;
    pub const NOT_FUNDED: i32 = 99;

    /// Funding models that draw public funding through the learner record.
    pub const FUNDED: &[i32] = &[
        AGE_16_TO_19,
        ADULT_SKILLS,
        APPRENTICESHIPS,
        OTHER_ADULT,
        OTHER_16_TO_19,
    ];
}

pub mod aim_type {
    pub const PROGRAMME_AIM: i32 = 1;
    pub const COMPONENT_AIM_IN_A_PROGRAMME: i32 = 3;
    pub const AIM_NOT_PART_OF_A_PROGRAMME: i32 = 4;
    pub const CORE_AIM_16_TO_19: i32 = 5;
}

pub mod comp_status {
    pub const CONTINUING: i32 = 1;
    pub const COMPLETED: i32 = 2;
    pub const WITHDRAWN: i32 = 3;
    pub const BREAK_IN_LEARNING: i32 = 6;
}

pub mod outcome {
    pub const ACHIEVED: i32 = 1;
    pub const PARTIAL_ACHIEVEMENT: i32 = 2;
    pub const NO_ACHIEVEMENT: i32 = 3;
    pub const LEARNING_ACTIVITIES_COMPLETE: i32 = 8;
}

pub mod prog_type {
    pub const ADVANCED_LEVEL_APPRENTICESHIP: i32 = 2;
    pub const INTERMEDIATE_LEVEL_APPRENTICESHIP: i32 = 3;
    pub const HIGHER_APPRENTICESHIP_LEVEL_4: i32 = 20;
    pub const HIGHER_APPRENTICESHIP_LEVEL_5: i32 = 21;
    pub const HIGHER_APPRENTICESHIP_LEVEL_6: i32 = 22;
    pub const HIGHER_APPRENTICESHIP_LEVEL_7_PLUS: i32 = 23;
    pub const TRAINEESHIP: i32 = 24;
    pub const APPRENTICESHIP_STANDARD: i32 = 25;

    pub const FRAMEWORKS: &[i32] = &[
        ADVANCED_LEVEL_APPRENTICESHIP,
        INTERMEDIATE_LEVEL_APPRENTICESHIP,
        HIGHER_APPRENTICESHIP_LEVEL_4,
        HIGHER_APPRENTICESHIP_LEVEL_5,
        HIGHER_APPRENTICESHIP_LEVEL_6,
        HIGHER_APPRENTICESHIP_LEVEL_7_PLUS,
    ];
}

pub mod lldd_health_prob {
    pub const HAS_DISABILITY: i32 = 1;
    pub const NO_DISABILITY: i32 = 2;
    pub const NOT_PROVIDED: i32 = 9;
}

pub mod emp_stat {
    pub const IN_PAID_EMPLOYMENT: i32 = 10;
    pub const NOT_EMPLOYED_SEEKING: i32 = 11;
    pub const NOT_EMPLOYED_NOT_SEEKING: i32 = 12;
    pub const NOT_KNOWN: i32 = 98;
}

/// Learning delivery FAM types.
pub mod del_fam {
    pub const SOURCE_OF_FUNDING: &str = "SOF";
    pub const FULL_OR_CO_FUNDING: &str = "FFI";
    pub const ELIGIBILITY_FOR_ENHANCED_FUNDING: &str = "EEF";
    pub const RESTART: &str = "RES";
    pub const LEARNING_DELIVERY_MONITORING: &str = "LDM";
    pub const DEVOLVED_AREA_MONITORING: &str = "DAM";
    pub const ADVANCED_LEARNER_LOAN_BURSARY: &str = "ALB";
    pub const APPRENTICESHIP_CONTRACT: &str = "ACT";
    pub const LEARNING_SUPPORT_FUNDING: &str = "LSF";
    pub const ADVANCED_LEARNER_LOAN: &str = "ADL";
    pub const COMMUNITY_LEARNING_PROVISION: &str = "ASL";
    pub const HOUSEHOLD_SITUATION: &str = "HHS";
    pub const HE_MONITORING: &str = "HEM";
    pub const SPECIAL_PROJECTS: &str = "SPP";
    pub const NATIONAL_SKILLS_ACADEMY: &str = "NSA";
    pub const WORKPLACE_PLACEMENT: &str = "WPP";
    pub const PERCENTAGE_ONLINE: &str = "POD";
    pub const FAMILY_LEARNING: &str = "FLN";

    /// Types whose records carry a date range.
    pub const DATED: &[&str] = &[
        ADVANCED_LEARNER_LOAN_BURSARY,
        APPRENTICESHIP_CONTRACT,
        LEARNING_SUPPORT_FUNDING,
    ];
}

/// Learner FAM types.
pub mod learner_fam {
    pub const HIGH_NEEDS_STUDENTS: &str = "HNS";
    pub const EDUCATION_HEALTH_CARE_PLAN: &str = "EHC";
    pub const DISABLED_STUDENTS_ALLOWANCE: &str = "DLA";
    pub const LEARNER_SUPPORT_REASON: &str = "LSR";
    pub const SPECIAL_EDUCATIONAL_NEEDS: &str = "SEN";
    pub const NATIONAL_LEARNER_MONITORING: &str = "NLM";
    pub const ELIGIBILITY_FOR_DISADVANTAGE_FUNDING: &str = "EDF";
    pub const GCSE_MATHS_CONDITION_OF_FUNDING: &str = "MCF";
    pub const GCSE_ENGLISH_CONDITION_OF_FUNDING: &str = "ECF";
    pub const FREE_MEALS_ELIGIBILITY: &str = "FME";
    pub const PUPIL_PREMIUM_ELIGIBILITY: &str = "PPE";
}

/// Employment status monitoring types.
pub mod esm {
    pub const SELF_EMPLOYMENT_INDICATOR: &str = "SEI";
    pub const EMPLOYMENT_INTENSITY_INDICATOR: &str = "EII";
    pub const LENGTH_OF_UNEMPLOYMENT: &str = "LOU";
    pub const LENGTH_OF_EMPLOYMENT: &str = "LOE";
    pub const BENEFIT_STATUS_INDICATOR: &str = "BSI";
    pub const PREVIOUS_EDUCATION_INDICATOR: &str = "PEI";
    pub const SMALL_EMPLOYER: &str = "SEM";
    pub const OTHER_EMPLOYMENT_TYPE: &str = "OET";
}

/// Apprenticeship financial record types.
pub mod afin {
    pub const TOTAL_NEGOTIATED_PRICE: &str = "TNP";
    pub const PAYMENT_RECORD: &str = "PMR";
}
