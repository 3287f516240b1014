use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raised when a raw form value does not belong to a categorical field's value set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {kind} value")]
pub struct UnknownChoice {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a closed categorical value set with its wire spelling, aliases, and display label.
macro_rules! categorical {
    (
        $(#[$meta:meta])*
        $name:ident as $kind:literal {
            $( $variant:ident => $wire:literal $(| $alias:literal)* : $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire $(, alias = $alias)*)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }

            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownChoice;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                let value = raw.trim();
                $(
                    if value.eq_ignore_ascii_case($wire) $(|| value.eq_ignore_ascii_case($alias))* {
                        return Ok(Self::$variant);
                    }
                )+
                Err(UnknownChoice {
                    kind: $kind,
                    value: value.to_string(),
                })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

categorical! {
    Gender as "gender" {
        Male => "male": "Male",
        Female => "female": "Female",
        Other => "other": "Other",
    }
}

categorical! {
    /// Whether the starting lifespan comes from the population table or from the user.
    EstimationMode as "estimation type" {
        System => "system": "System Estimate",
        User => "user": "User Estimate",
    }
}

impl Default for EstimationMode {
    fn default() -> Self {
        Self::User
    }
}

categorical! {
    MedicalCondition as "medical condition" {
        Good => "good": "Good",
        Bad => "bad": "Bad",
    }
}

categorical! {
    CurrentSituation as "current situation" {
        Healthy => "healthy": "Healthy",
        Unhealthy => "unhealthy": "Unhealthy",
    }
}

categorical! {
    Location as "location" {
        Urban => "urban": "Urban",
        Suburban => "suburban": "Suburban",
        Rural => "rural": "Rural",
        Unspecified => "none": "Prefer not to say",
    }
}

categorical! {
    MentalHealth as "mental health" {
        Good => "good": "Good Mental Health",
        Anxiety => "anxiety": "Anxiety",
        Depression => "depression": "Depression",
        Burnout => "burnout" | "Burnout": "Burnout",
        Other => "other": "Other Mental Health Concern",
    }
}

categorical! {
    SleepPattern as "sleep pattern" {
        Good => "good" | "normal": "Good Sleep (7-9 hours/night)",
        Insomnia => "insomnia": "Insomnia",
        Other => "other" | "irregular": "Other Sleep Issues",
    }
}

categorical! {
    EnvironmentalFactor as "environmental factor" {
        Pollution => "pollution": "High Pollution Area",
        AirQuality => "air_quality": "Good Air Quality",
        GreenSpaces => "green_spaces": "Access to Green Spaces",
        NaturalDisasters => "natural_disasters": "Prone to Natural Disasters",
    }
}

categorical! {
    SocialRelationships as "social relationships" {
        Strong => "strong": "Strong Social Connections",
        Moderate => "moderate": "Moderate Social Connections",
        Weak => "weak": "Few Social Connections",
    }
}

categorical! {
    HealthcareAccess as "healthcare access" {
        RegularCheckups => "regular_checkups": "Regular Check-ups",
        EmergencyOnly => "emergency_only": "Emergency Care Only",
        NoAccess => "no_access": "Limited Healthcare Access",
    }
}

categorical! {
    ExerciseFrequency as "exercise frequency" {
        Daily => "daily": "Daily",
        Weekly => "weekly": "3-5 Times Weekly",
        Occasionally => "occasionally" | "rarely": "Occasionally",
        Never => "never": "Never",
    }
}

categorical! {
    StressManagement as "stress management" {
        Meditation => "meditation": "Meditation",
        Yoga => "yoga": "Yoga",
        Therapy => "therapy": "Therapy",
        Exercise => "exercise": "Exercise",
        NoPractice => "none": "No Stress Management",
    }
}

categorical! {
    HydrationLevel as "hydration level" {
        VeryHigh => "very_high": "8+ Glasses of Water Daily",
        High => "high": "6-8 Glasses of Water Daily",
        Moderate => "moderate": "4-6 Glasses of Water Daily",
        Low => "low": "2-4 Glasses of Water Daily",
        VeryLow => "very_low": "Less than 2 Glasses Daily",
    }
}

categorical! {
    SunExposure as "sun exposure" {
        Minimal => "minimal": "Minimal (Indoor Most of the Time)",
        Moderate => "moderate": "Moderate (15-30 mins Daily)",
        High => "high": "High (1-2 Hours Daily)",
        Excessive => "excessive": "Excessive (2+ Hours without Protection)",
    }
}

categorical! {
    DietType as "diet type" {
        Balanced => "balanced": "Balanced Diet",
        Vegetarian => "vegetarian": "Vegetarian",
        Vegan => "vegan": "Vegan",
        Keto => "keto": "Keto",
        Mediterranean => "mediterranean": "Mediterranean",
        Processed => "processed": "High Processed Foods",
        HighSugar => "high_sugar": "High Sugar Diet",
    }
}

categorical! {
    AlcoholConsumption as "alcohol consumption" {
        Abstinent => "none": "None",
        Occasional => "occasional": "Occasional (Few drinks per month)",
        Moderate => "moderate": "Moderate (Few drinks per week)",
        Heavy => "heavy": "Heavy (Daily drinking)",
    }
}

categorical! {
    ScreenTime as "screen time" {
        UpToTwoHours => "1-2": "1-2 hours",
        ThreeToFourHours => "3-4": "3-4 hours",
        FiveToSixHours => "5-6": "5-6 hours",
        OverSixHours => "6+": "6+ hours",
    }
}

categorical! {
    LifestyleHabit as "lifestyle habit" {
        Smoking => "smoking": "Smoking",
        Alcohol => "alcohol": "Regular Alcohol",
        Diet => "diet": "Poor Diet",
        Exercise => "exercise": "Regular Exercise",
        Stress => "stress": "High Stress",
    }
}

categorical! {
    ChronicCondition as "chronic condition" {
        Diabetes => "diabetes": "Diabetes",
        Hypertension => "hypertension": "Hypertension",
        HeartDisease => "heart_disease": "Heart Disease",
        Cancer => "cancer": "Cancer",
        Respiratory => "respiratory": "Respiratory Disease",
    }
}

categorical! {
    FamilyHistoryFactor as "family history" {
        Longevity => "longevity": "Family Longevity",
        HeartDisease => "heart_disease": "Heart Disease",
        Cancer => "cancer": "Cancer",
        Diabetes => "diabetes": "Diabetes",
    }
}

categorical! {
    /// The six ordered wizard sections.
    WizardSection as "wizard section" {
        Personal => "personal": "Personal",
        Health => "health": "Health",
        Lifestyle => "lifestyle": "Lifestyle",
        Activity => "activity": "Activity",
        Diet => "diet": "Diet",
        Calculate => "calculate": "Calculate",
    }
}

impl WizardSection {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Personal,
            Self::Health,
            Self::Lifestyle,
            Self::Activity,
            Self::Diet,
            Self::Calculate,
        ]
    }

    pub fn position(self) -> usize {
        Self::ordered()
            .iter()
            .position(|section| *section == self)
            .unwrap_or(0)
    }

    pub fn next(self) -> Option<Self> {
        Self::ordered().get(self.position() + 1).copied()
    }

    pub fn previous(self) -> Option<Self> {
        self.position()
            .checked_sub(1)
            .and_then(|index| Self::ordered().get(index).copied())
    }
}

impl Default for WizardSection {
    fn default() -> Self {
        Self::Personal
    }
}

categorical! {
    /// Scalar (single-valued) answer fields, in form order.
    Field as "field" {
        Name => "name": "Name",
        Email => "email": "Email",
        DateOfBirth => "dateOfBirth" | "dob": "Date of Birth",
        Gender => "gender": "Gender",
        Mobile => "mobile" | "phone": "Mobile",
        Height => "height": "Height",
        Weight => "weight": "Weight",
        Location => "location": "Location",
        MedicalCondition => "medicalCondition": "Medical Condition",
        CurrentSituation => "currentSituation": "Current Situation",
        SmokingYears => "smokingYears": "Smoking Years",
        MentalHealth => "mentalHealth": "Mental Health",
        SleepPatterns => "sleepPatterns": "Sleep Patterns",
        EnvironmentalFactors => "environmentalFactors": "Environmental Factors",
        SocialRelationships => "socialRelationships": "Social Relationships",
        AccessHealthcare => "accessHealthcare": "Access to Healthcare",
        ExerciseFrequency => "exerciseFrequency": "Exercise Frequency",
        StressManagement => "stressManagement": "Stress Management",
        HydrationLevel => "hydrationLevel": "Hydration Level",
        SunExposure => "sunExposure": "Sun Exposure",
        DietType => "dietType": "Diet Type",
        AlcoholConsumption => "alcoholConsumption": "Alcohol Consumption",
        ScreenTime => "screenTime": "Screen Time",
        EstimationType => "estimationType": "Estimation Type",
        UserEstimatedLifespan => "userEstimatedLifespan": "Your Estimated Lifespan",
    }
}

impl Field {
    pub const fn section(self) -> WizardSection {
        match self {
            Self::Name
            | Self::Email
            | Self::DateOfBirth
            | Self::Gender
            | Self::Mobile
            | Self::Height
            | Self::Weight
            | Self::Location => WizardSection::Personal,
            Self::MedicalCondition | Self::CurrentSituation => WizardSection::Health,
            Self::SmokingYears | Self::MentalHealth | Self::SleepPatterns => {
                WizardSection::Lifestyle
            }
            Self::EnvironmentalFactors
            | Self::SocialRelationships
            | Self::AccessHealthcare
            | Self::ExerciseFrequency
            | Self::StressManagement
            | Self::HydrationLevel
            | Self::SunExposure => WizardSection::Activity,
            Self::DietType | Self::AlcoholConsumption | Self::ScreenTime => WizardSection::Diet,
            Self::EstimationType | Self::UserEstimatedLifespan => WizardSection::Calculate,
        }
    }

    /// Single-choice categorical fields that must all be answered before scoring.
    pub const fn required_choices() -> [Self; 15] {
        [
            Self::Location,
            Self::MedicalCondition,
            Self::CurrentSituation,
            Self::MentalHealth,
            Self::SleepPatterns,
            Self::EnvironmentalFactors,
            Self::SocialRelationships,
            Self::AccessHealthcare,
            Self::ExerciseFrequency,
            Self::StressManagement,
            Self::HydrationLevel,
            Self::SunExposure,
            Self::DietType,
            Self::AlcoholConsumption,
            Self::ScreenTime,
        ]
    }

    /// Allowed wire values for categorical fields; empty for free-form fields.
    pub fn choices(self) -> Vec<&'static str> {
        fn wire<T: Copy>(all: &[T], as_str: fn(T) -> &'static str) -> Vec<&'static str> {
            all.iter().map(|value| as_str(*value)).collect()
        }

        match self {
            Self::Gender => wire(Gender::ALL, Gender::as_str),
            Self::Location => wire(Location::ALL, Location::as_str),
            Self::MedicalCondition => wire(MedicalCondition::ALL, MedicalCondition::as_str),
            Self::CurrentSituation => wire(CurrentSituation::ALL, CurrentSituation::as_str),
            Self::MentalHealth => wire(MentalHealth::ALL, MentalHealth::as_str),
            Self::SleepPatterns => wire(SleepPattern::ALL, SleepPattern::as_str),
            Self::EnvironmentalFactors => {
                wire(EnvironmentalFactor::ALL, EnvironmentalFactor::as_str)
            }
            Self::SocialRelationships => {
                wire(SocialRelationships::ALL, SocialRelationships::as_str)
            }
            Self::AccessHealthcare => wire(HealthcareAccess::ALL, HealthcareAccess::as_str),
            Self::ExerciseFrequency => wire(ExerciseFrequency::ALL, ExerciseFrequency::as_str),
            Self::StressManagement => wire(StressManagement::ALL, StressManagement::as_str),
            Self::HydrationLevel => wire(HydrationLevel::ALL, HydrationLevel::as_str),
            Self::SunExposure => wire(SunExposure::ALL, SunExposure::as_str),
            Self::DietType => wire(DietType::ALL, DietType::as_str),
            Self::AlcoholConsumption => wire(AlcoholConsumption::ALL, AlcoholConsumption::as_str),
            Self::ScreenTime => wire(ScreenTime::ALL, ScreenTime::as_str),
            Self::EstimationType => wire(EstimationMode::ALL, EstimationMode::as_str),
            Self::Name
            | Self::Email
            | Self::DateOfBirth
            | Self::Mobile
            | Self::Height
            | Self::Weight
            | Self::SmokingYears
            | Self::UserEstimatedLifespan => Vec::new(),
        }
    }
}

categorical! {
    /// Multi-choice answer collections.
    Collection as "collection" {
        LifestyleHabits => "lifestyleHabits": "Lifestyle Habits",
        ChronicConditions => "chronicConditions": "Chronic Conditions",
        FamilyHistory => "familyHistory": "Family History",
    }
}

impl Collection {
    pub const fn section(self) -> WizardSection {
        match self {
            Self::LifestyleHabits => WizardSection::Lifestyle,
            Self::ChronicConditions | Self::FamilyHistory => WizardSection::Health,
        }
    }

    pub fn choices(self) -> Vec<&'static str> {
        match self {
            Self::LifestyleHabits => LifestyleHabit::ALL.iter().map(|v| v.as_str()).collect(),
            Self::ChronicConditions => ChronicCondition::ALL.iter().map(|v| v.as_str()).collect(),
            Self::FamilyHistory => FamilyHistoryFactor::ALL.iter().map(|v| v.as_str()).collect(),
        }
    }
}

/// Multi-choice answer kept in the order members were picked.
#[derive(Debug, Clone)]
pub struct Selection<T> {
    members: Vec<T>,
}

impl<T> Selection<T> {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn contains(&self, member: &T) -> bool {
        self.members.contains(member)
    }

    /// Adds an absent member at the end or removes a present one; returns presence afterwards.
    pub fn toggle(&mut self, member: T) -> bool {
        match self.members.iter().position(|existing| *existing == member) {
            Some(index) => {
                self.members.remove(index);
                false
            }
            None => {
                self.members.push(member);
                true
            }
        }
    }
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for Selection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.members.len() == other.members.len()
            && self.members.iter().all(|member| other.contains(member))
    }
}

impl<T: PartialEq> FromIterator<T> for Selection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut selection = Self::new();
        for member in iter {
            if !selection.contains(&member) {
                selection.members.push(member);
            }
        }
        selection
    }
}

impl<'a, T> IntoIterator for &'a Selection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl<T: Serialize> Serialize for Selection<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.members.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de> + PartialEq> Deserialize<'de> for Selection<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let members = Vec::<T>::deserialize(deserializer)?;
        Ok(members.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_toggles_and_deduplicates() {
        let mut selection = Selection::new();
        assert!(selection.toggle(ChronicCondition::Cancer));
        assert!(selection.toggle(ChronicCondition::Diabetes));
        assert!(!selection.toggle(ChronicCondition::Cancer));
        assert_eq!(
            selection.iter().copied().collect::<Vec<_>>(),
            vec![ChronicCondition::Diabetes]
        );

        let parsed: Selection<LifestyleHabit> =
            serde_json::from_str(r#"["smoking","stress","smoking"]"#).expect("deserializes");
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn selection_equality_ignores_order() {
        let left: Selection<_> = [FamilyHistoryFactor::Cancer, FamilyHistoryFactor::Longevity]
            .into_iter()
            .collect();
        let right: Selection<_> = [FamilyHistoryFactor::Longevity, FamilyHistoryFactor::Cancer]
            .into_iter()
            .collect();
        assert_eq!(left, right);
    }

    #[test]
    fn parses_wire_values_and_aliases() {
        assert_eq!("air_quality".parse(), Ok(EnvironmentalFactor::AirQuality));
        assert_eq!("Burnout".parse(), Ok(MentalHealth::Burnout));
        assert_eq!("6+".parse(), Ok(ScreenTime::OverSixHours));
        assert_eq!("rarely".parse(), Ok(ExerciseFrequency::Occasionally));
        assert_eq!(" Male ".parse(), Ok(Gender::Male));
    }

    #[test]
    fn rejects_values_outside_the_set() {
        let err = "sometimes".parse::<ExerciseFrequency>().unwrap_err();
        assert_eq!(err.kind, "exercise frequency");
        assert_eq!(err.value, "sometimes");
    }

    #[test]
    fn serde_uses_form_spelling() {
        let json = serde_json::to_string(&ChronicCondition::HeartDisease).expect("serializes");
        assert_eq!(json, "\"heart_disease\"");
        let parsed: MentalHealth = serde_json::from_str("\"Burnout\"").expect("alias accepted");
        assert_eq!(parsed, MentalHealth::Burnout);
    }

    #[test]
    fn wizard_sections_step_within_bounds() {
        assert_eq!(WizardSection::Personal.previous(), None);
        assert_eq!(WizardSection::Personal.next(), Some(WizardSection::Health));
        assert_eq!(WizardSection::Diet.next(), Some(WizardSection::Calculate));
        assert_eq!(WizardSection::Calculate.next(), None);
        assert_eq!(WizardSection::Calculate.position(), 5);
    }

    #[test]
    fn every_field_belongs_to_a_section() {
        assert_eq!(Field::SunExposure.section(), WizardSection::Activity);
        assert_eq!(Field::UserEstimatedLifespan.section(), WizardSection::Calculate);
        assert!(Field::required_choices()
            .iter()
            .all(|field| !field.choices().is_empty()));
        assert!(Field::Name.choices().is_empty());
    }
}
