use super::super::answers::AnswerSet;
use super::super::domain::{
    DietType, EnvironmentalFactor, ExerciseFrequency, MedicalCondition, MentalHealth,
    SleepPattern, SocialRelationships,
};
use super::super::scoring::LifespanResult;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrecautionPriority {
    Critical,
    High,
    Medium,
    Low,
}

impl PrecautionPriority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High Priority",
            Self::Medium => "Medium Priority",
            Self::Low => "Recommended",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Precaution {
    pub category: &'static str,
    pub priority: PrecautionPriority,
    pub priority_label: &'static str,
    pub items: &'static [&'static str],
}

impl Precaution {
    const fn new(
        category: &'static str,
        priority: PrecautionPriority,
        items: &'static [&'static str],
    ) -> Self {
        Self {
            category,
            priority,
            priority_label: priority.label(),
            items,
        }
    }
}

pub const KEEP_AVAILABLE: &[&str] = &[
    "Emergency contact numbers",
    "List of current medications",
    "Medical history summary",
    "Insurance information",
];

pub const SEEK_IMMEDIATE_CARE: &[&str] = &[
    "Chest pain or difficulty breathing",
    "Sudden severe headache",
    "Loss of consciousness",
    "Severe allergic reactions",
];

const AGE_RELATED: Precaution = Precaution::new(
    "Age-Related Health",
    PrecautionPriority::High,
    &[
        "Annual cardiovascular screening recommended",
        "Regular cancer screenings as per guidelines",
        "Bone density tests every 2 years",
        "Vitamin D and B12 level monitoring",
    ],
);

const WEIGHT: Precaution = Precaution::new(
    "Weight Management",
    PrecautionPriority::Medium,
    &[
        "Consult a nutritionist for personalized meal planning",
        "Increase physical activity gradually",
        "Monitor blood pressure and cholesterol levels",
        "Consider joining a weight management program",
    ],
);

const CHRONIC: Precaution = Precaution::new(
    "Chronic Disease Management",
    PrecautionPriority::High,
    &[
        "Strict medication adherence as prescribed",
        "Regular specialist consultations",
        "Daily symptom monitoring and recording",
        "Emergency action plan preparation",
        "Lifestyle modifications as recommended",
    ],
);

const MENTAL: Precaution = Precaution::new(
    "Mental Health Support",
    PrecautionPriority::High,
    &[
        "Regular mental health check-ins with professionals",
        "Practice stress reduction techniques daily",
        "Maintain strong social connections",
        "Consider therapy or counseling if needed",
        "Limit exposure to stressful situations",
    ],
);

const SLEEP: Precaution = Precaution::new(
    "Sleep Hygiene",
    PrecautionPriority::Medium,
    &[
        "Establish consistent sleep schedule",
        "Create relaxing bedtime routine",
        "Limit screen time before bed",
        "Consider sleep study if problems persist",
        "Avoid caffeine and alcohol before sleep",
    ],
);

const ACTIVITY: Precaution = Precaution::new(
    "Physical Activity",
    PrecautionPriority::Medium,
    &[
        "Start with low-impact exercises like walking",
        "Gradually increase activity duration and intensity",
        "Consult physician before starting new exercise program",
        "Include strength training 2-3 times per week",
        "Stay hydrated during physical activities",
    ],
);

const NUTRITION: Precaution = Precaution::new(
    "Nutritional Health",
    PrecautionPriority::Medium,
    &[
        "Reduce processed food consumption gradually",
        "Increase fruit and vegetable intake",
        "Monitor blood sugar levels regularly",
        "Stay hydrated with water, limit sugary drinks",
        "Consider consultation with a registered dietitian",
    ],
);

const SMOKING: Precaution = Precaution::new(
    "Smoking Cessation",
    PrecautionPriority::Critical,
    &[
        "Immediate cessation is highly recommended",
        "Consult healthcare provider for cessation programs",
        "Regular lung function tests",
        "Monitor for respiratory symptoms",
        "Consider nicotine replacement therapy",
    ],
);

const SOCIAL: Precaution = Precaution::new(
    "Social Wellness",
    PrecautionPriority::Medium,
    &[
        "Actively seek social connections",
        "Join community groups or clubs",
        "Maintain regular contact with family and friends",
        "Consider volunteer opportunities",
        "Practice social skills in comfortable settings",
    ],
);

const ENVIRONMENT: Precaution = Precaution::new(
    "Environmental Health",
    PrecautionPriority::Medium,
    &[
        "Use air purifiers in living spaces",
        "Wear masks during high pollution days",
        "Regular respiratory health monitoring",
        "Limit outdoor activities during poor air quality",
        "Consider relocating if possible",
    ],
);

const PREVENTIVE: Precaution = Precaution::new(
    "Preventive Care",
    PrecautionPriority::Low,
    &[
        "Annual comprehensive physical examinations",
        "Regular dental checkups and cleanings",
        "Eye examinations every 1-2 years",
        "Skin cancer screenings annually",
        "Stay up-to-date with vaccinations",
    ],
);

/// Personalised precautions in panel order; preventive care is always last.
pub fn precautions(answers: &AnswerSet, result: &LifespanResult) -> Vec<Precaution> {
    let mut out = Vec::new();

    if result.age >= 40 {
        out.push(AGE_RELATED);
    }
    if result.bmi.is_some_and(|bmi| bmi > 25.0) {
        out.push(WEIGHT);
    }
    if answers.medical_condition == Some(MedicalCondition::Bad)
        || !answers.chronic_conditions.is_empty()
    {
        out.push(CHRONIC);
    }
    if answers
        .mental_health
        .is_some_and(|state| state != MentalHealth::Good)
    {
        out.push(MENTAL);
    }
    if matches!(
        answers.sleep_patterns,
        Some(SleepPattern::Insomnia | SleepPattern::Other)
    ) {
        out.push(SLEEP);
    }
    if matches!(
        answers.exercise_frequency,
        Some(ExerciseFrequency::Never | ExerciseFrequency::Occasionally)
    ) {
        out.push(ACTIVITY);
    }
    if matches!(
        answers.diet_type,
        Some(DietType::Processed | DietType::HighSugar)
    ) {
        out.push(NUTRITION);
    }
    if answers.is_smoker() {
        out.push(SMOKING);
    }
    if answers.social_relationships == Some(SocialRelationships::Weak) {
        out.push(SOCIAL);
    }
    if answers.environmental_factors == Some(EnvironmentalFactor::Pollution) {
        out.push(ENVIRONMENT);
    }

    out.push(PREVENTIVE);
    out
}
