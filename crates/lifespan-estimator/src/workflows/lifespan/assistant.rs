//! Scripted chat responders. Both are ordered keyword tables evaluated first-match-wins.

use super::answers::AnswerSet;
use super::domain::{
    ChronicCondition, DietType, ExerciseFrequency, HydrationLevel, MedicalCondition, MentalHealth,
    SleepPattern, StressManagement,
};
use super::scoring::BmiBand;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const NEED_PROFILE: &str =
    "I need more information about your health profile to give personalized advice.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatMode {
    #[default]
    Faq,
    Coach,
}

struct FaqEntry {
    keyword: &'static str,
    answer: &'static str,
}

const FAQ: &[FaqEntry] = &[
    FaqEntry {
        keyword: "how does it work",
        answer: "The calculator starts from an average life expectancy for your declared gender, or from the lifespan you enter yourself, subtracts your current age, and then adds or removes years for each health, lifestyle, activity and diet answer you give.",
    },
    FaqEntry {
        keyword: "is it accurate",
        answer: "The estimate follows a fixed set of rules and is meant as a guide. Nobody can predict an individual future with certainty, so treat the number as a prompt for healthy changes rather than a forecast.",
    },
    FaqEntry {
        keyword: "what factors",
        answer: "We look at age, gender, height and weight, medical condition, chronic conditions, family history, smoking and alcohol, mental health, sleep, environment, social connections, access to healthcare, exercise, stress management, hydration, sun exposure, diet and screen time.",
    },
    FaqEntry {
        keyword: "is it safe",
        answer: "Your answers are only used to compute the estimate for this session. Nothing is stored or shared with third parties.",
    },
    FaqEntry {
        keyword: "medical advice",
        answer: "This tool is for educational purposes only and does not replace professional medical advice, diagnosis or treatment. Please consult a qualified healthcare provider for medical decisions.",
    },
    FaqEntry {
        keyword: "improve lifespan",
        answer: "Well-supported longevity habits include at least 150 minutes of exercise a week, a diet rich in whole foods, 7-9 hours of sleep, stress management, avoiding smoking, limiting alcohol, strong social ties, staying hydrated and regular health check-ups.",
    },
    FaqEntry {
        keyword: "privacy",
        answer: "Your health answers are processed only to produce your estimate. We do not track you, keep your data or sell it.",
    },
    FaqEntry {
        keyword: "diet",
        answer: "For longevity, favour colourful fruit and vegetables, whole grains, lean proteins such as fish and legumes, healthy fats like olive oil and nuts, and keep processed foods to a minimum.",
    },
    FaqEntry {
        keyword: "exercise",
        answer: "Aim for 150 minutes or more of moderate activity a week, mixing cardio for heart health, strength training for muscle, and flexibility and balance work. Even short daily walks help.",
    },
    FaqEntry {
        keyword: "stress",
        answer: "Chronic stress is manageable. Daily meditation, deep breathing, regular exercise, creative hobbies, time in nature, good sleep, social support and professional therapy when needed all help.",
    },
    FaqEntry {
        keyword: "sleep",
        answer: "Adults need 7-9 hours of quality sleep a night. Sleep repairs tissue, consolidates memory, regulates hormones and supports immunity. Keep your bedroom cool, dark and quiet.",
    },
    FaqEntry {
        keyword: "smoking",
        answer: "Smoking can cost more than ten years of life, and quitting at any age brings benefits. Circulation and breathing start to improve soon after the last cigarette, and cancer and heart disease risk fall over time.",
    },
];

const GREETING: &str = "Hello! I can answer questions about the lifespan calculator and general health topics. What would you like to know?";
const THANKS: &str =
    "You're welcome! Come back any time you have questions about health or the calculator.";
const FAQ_FALLBACK: &str = "I don't have an answer for that yet. I can explain how the lifespan calculator works and share general health information. For specific medical concerns, please consult a healthcare professional.";

/// Canned answers about the calculator itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct FaqResponder;

impl FaqResponder {
    pub fn reply(&self, message: &str) -> &'static str {
        let lower = message.to_lowercase();

        if let Some(entry) = FAQ.iter().find(|entry| lower.contains(entry.keyword)) {
            return entry.answer;
        }

        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .collect();
        if words
            .iter()
            .any(|word| matches!(*word, "hello" | "hi" | "hey"))
        {
            return GREETING;
        }
        if lower.contains("thank") {
            return THANKS;
        }
        FAQ_FALLBACK
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Topic {
    Exercise,
    Diet,
    Sleep,
    Stress,
    Lifespan,
    Weight,
    Hydration,
    MentalHealth,
}

struct TopicRule {
    topic: Topic,
    keywords: &'static [&'static str],
}

const TOPICS: &[TopicRule] = &[
    TopicRule {
        topic: Topic::Exercise,
        keywords: &["exercise", "workout"],
    },
    TopicRule {
        topic: Topic::Diet,
        keywords: &["diet", "eat", "food"],
    },
    TopicRule {
        topic: Topic::Sleep,
        keywords: &["sleep", "rest"],
    },
    TopicRule {
        topic: Topic::Stress,
        keywords: &["stress", "anxiety"],
    },
    TopicRule {
        topic: Topic::Lifespan,
        keywords: &["lifespan", "live longer"],
    },
    TopicRule {
        topic: Topic::Weight,
        keywords: &["weight", "bmi"],
    },
    TopicRule {
        topic: Topic::Hydration,
        keywords: &["hydration", "water"],
    },
    TopicRule {
        topic: Topic::MentalHealth,
        keywords: &["mental health", "depression"],
    },
];

/// Health coach that tailors canned advice to the caller's answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthAssistant;

impl HealthAssistant {
    pub fn reply(&self, message: &str, answers: Option<&AnswerSet>, today: NaiveDate) -> String {
        let lower = message.to_lowercase();
        let topic = TOPICS
            .iter()
            .find(|rule| rule.keywords.iter().any(|keyword| lower.contains(keyword)))
            .map(|rule| rule.topic);

        match (topic, answers) {
            (None, answers) => general(answers),
            (Some(_), None) => NEED_PROFILE.to_string(),
            (Some(topic), Some(answers)) => match topic {
                Topic::Exercise => exercise(answers).to_string(),
                Topic::Diet => diet(answers).to_string(),
                Topic::Sleep => sleep(answers).to_string(),
                Topic::Stress => stress(answers).to_string(),
                Topic::Lifespan => lifespan(answers, today),
                Topic::Weight => weight(answers).to_string(),
                Topic::Hydration => hydration(answers).to_string(),
                Topic::MentalHealth => mental_health(answers).to_string(),
            },
        }
    }

    pub fn suggestions(&self, answers: Option<&AnswerSet>) -> Vec<&'static str> {
        let Some(answers) = answers else {
            return vec![
                "How can I improve my health?",
                "What are some exercise tips?",
                "How can I sleep better?",
                "Tips for reducing stress",
            ];
        };

        let mut out = Vec::new();
        if matches!(
            answers.exercise_frequency,
            Some(ExerciseFrequency::Never | ExerciseFrequency::Occasionally)
        ) {
            out.push("How can I start exercising?");
        }
        if answers.sleep_patterns.is_some_and(|s| s != SleepPattern::Good) {
            out.push("How can I sleep better?");
        }
        if answers.is_smoker() {
            out.push("How does smoking affect my lifespan?");
        }
        if answers.bmi().is_some_and(|bmi| bmi >= 25.0) {
            out.push("How can I manage my weight?");
        }
        out.push("How can I live longer?");
        out
    }
}

fn exercise(answers: &AnswerSet) -> &'static str {
    match answers.exercise_frequency {
        Some(ExerciseFrequency::Daily) => "You already exercise daily, which is excellent. Keep it varied with a mix of cardio, strength and flexibility work, try some interval training, and build in rest days so your body can recover.",
        Some(ExerciseFrequency::Weekly) => "Weekly exercise puts you on the right track. Work up to 4-5 sessions a week with a mix of activities; an extra 10-minute walk each day is an easy start, and a class or workout partner helps you stay consistent.",
        Some(ExerciseFrequency::Occasionally) => "Start small with a 10-minute walk each day, then add activities you enjoy such as swimming, cycling or dancing. Consistency matters more than intensity at first, and every bit of movement counts.",
        Some(ExerciseFrequency::Never) => "It is never too late to start. Begin with 5 minutes of gentle walking or stretching a day and build from there. Check with a healthcare provider before starting a new routine, especially with existing conditions.",
        None => "Aim for 150 minutes of moderate exercise a week spread over several days. Combining cardio, strength training and flexibility work gives the broadest benefits.",
    }
}

fn diet(answers: &AnswerSet) -> &'static str {
    match answers.diet_type {
        Some(DietType::Balanced) => "Your balanced diet is a strong base. Pay attention to portion sizes and protein at each meal, add more colourful vegetables, and include omega-3 sources such as fatty fish, flaxseed or walnuts.",
        Some(DietType::Vegetarian | DietType::Vegan) => "A plant-based diet is a great foundation. Make sure you get enough vitamin B12, iron, zinc and omega-3s through fortified foods or supplements, and vary your proteins with legumes, tofu and tempeh.",
        Some(DietType::Mediterranean) => "The Mediterranean diet is an excellent choice for long-term health. Keep up the olive oil, nuts, vegetables, whole grains and fish, and cut refined carbohydrates further where you can.",
        Some(DietType::Processed | DietType::HighSugar) => "Small swaps make a big difference. Replace one processed item a day with a whole-food alternative, add a fruit or vegetable to every meal, cut added sugar gradually, and plan meals ahead so you rely less on convenience food.",
        Some(DietType::Keto) | None => "Build your diet on whole, unprocessed foods: vegetables, fruit, lean proteins, whole grains and healthy fats. A simple guide is half a plate of vegetables, a quarter protein and a quarter whole grains.",
    }
}

fn sleep(answers: &AnswerSet) -> &'static str {
    match answers.sleep_patterns {
        Some(SleepPattern::Insomnia) => "Tackling insomnia matters for your overall health. Keep the same bed and wake times every day, avoid screens for 30 minutes before bed, and keep the bedroom cool, dark and quiet. If it persists, talk to a healthcare provider.",
        Some(SleepPattern::Other) => "Sleep problems can have a large effect on health. Keep a regular schedule, limit caffeine, alcohol and heavy meals before bed, try relaxation before sleeping, and track your sleep to spot what disrupts it.",
        Some(SleepPattern::Good) | None => "Quality sleep is essential for longevity. Aim for 7-9 hours a night on a consistent schedule, get daylight in the morning, and keep screens, caffeine and alcohol away from bedtime.",
    }
}

fn stress(answers: &AnswerSet) -> &'static str {
    match answers.stress_management {
        Some(StressManagement::Meditation | StressManagement::Yoga) => "You already use effective stress techniques. Try combining meditation and yoga, keep a short daily practice going, and experiment with breathwork or progressive muscle relaxation.",
        Some(StressManagement::NoPractice) => "Finding a way to manage stress could noticeably improve your wellbeing. Start with 5 minutes of deep breathing a day, take short breaks outdoors, stay in touch with supportive people, and consider a gratitude journal.",
        _ => "Regular stress management is vital. Breathing exercises, meditation, yoga, time in nature or journaling all help, and even 5-10 minutes a day makes a difference. Set boundaries around work and devices.",
    }
}

fn lifespan(answers: &AnswerSet, today: NaiveDate) -> String {
    let mut response = String::from("The keys to longevity are regular physical activity, a plant-rich diet, social connection, managing stress, quality sleep, avoiding smoking and excess alcohol, staying mentally active, and regular check-ups. ");
    if answers.age_on(today).is_some_and(|age| age > 50) {
        response.push_str("Past 50, strength training to maintain muscle mass and regular health screenings deserve extra attention. ");
    }
    if answers
        .chronic_conditions
        .contains(&ChronicCondition::Diabetes)
    {
        response.push_str("With diabetes, keeping blood sugar stable through diet, exercise and medication is crucial. ");
    }
    if answers.is_smoker() {
        response.push_str("Quitting smoking is the single most effective step you could take to extend your lifespan. ");
    }
    response.push_str("Small, consistent habits sustained over time have the biggest impact.");
    response
}

fn weight(answers: &AnswerSet) -> &'static str {
    match answers.bmi().map(BmiBand::classify) {
        None => "For healthy weight management focus on nutrient-dense whole foods, regular activity, good sleep and stress management. Energy, mood and how you function day to day matter as much as the number on the scale.",
        Some(BmiBand::Underweight) => "Your BMI suggests you may be underweight. A healthcare provider can help decide whether gaining weight would benefit you; nutrient-dense foods, enough protein and strength training are good places to start.",
        Some(BmiBand::Normal) => "Your BMI is in the generally healthy range. Keep up balanced nutrition and regular activity, and remember BMI does not distinguish muscle from fat.",
        Some(BmiBand::Overweight) => "Your BMI suggests you may be overweight. Small sustainable changes work better than drastic ones: more vegetables, lean protein and whole grains, less processed food and sugar. Losing even 5-10% improves health markers.",
        Some(BmiBand::Obese | BmiBand::SeverelyObese) => "Your BMI is in the obese range, which raises health risks. Work with a healthcare provider on a personal plan, aim for gradual change, and keep moving; walking alone brings real benefits.",
    }
}

fn hydration(answers: &AnswerSet) -> &'static str {
    match answers.hydration_level {
        Some(HydrationLevel::VeryLow) => "Your hydration is a concern. Keep a water bottle with you, set reminders to drink, and build up to at least 8 cups a day, more when active or in hot weather.",
        Some(HydrationLevel::Low) => "Your hydration could improve. Drink a glass of water when you wake and before each meal, choose water over sugary drinks, and eat water-rich foods such as cucumber and oranges.",
        Some(HydrationLevel::Moderate) => "You're doing reasonably well. Add one more glass a day, keep water in sight, and drink more during exercise, illness or hot weather.",
        Some(HydrationLevel::High | HydrationLevel::VeryHigh) => "You're well hydrated. Adjust intake to activity and weather, and use thirst and urine colour as guides; pale yellow is ideal.",
        None => "Aim for about 8 cups of water a day, more when active or in hot weather. Pale yellow urine is a good sign, and fruit and vegetables count toward your intake.",
    }
}

fn mental_health(answers: &AnswerSet) -> &'static str {
    match answers.mental_health {
        Some(MentalHealth::Anxiety) => "Anxiety can be eased with regular aerobic exercise, mindfulness and deep breathing, less caffeine and alcohol, and enough sleep. If it interferes with daily life, a mental health professional can help.",
        Some(MentalHealth::Depression) => "Depression deserves proper care. Physical activity, staying connected, daily routine and morning light all help, and therapy, medication or both can be very effective. Be patient and kind with yourself.",
        Some(MentalHealth::Burnout) => "Recovering from burnout starts with boundaries. Identify what drains you most, protect time for sleep, movement and nature, delegate where you can, and reconnect with activities that bring meaning.",
        Some(MentalHealth::Other) => "Mental health matters as much as physical health. Activity, sleep, social connection and stress management all support it. Seeking professional help is a sign of strength.",
        Some(MentalHealth::Good) | None => "Good mental health rests on activity, connection, sleep and stress management. Make time for things that bring you joy, and talk to a provider if you notice lasting changes in mood, sleep or energy.",
    }
}

fn general(answers: Option<&AnswerSet>) -> String {
    let Some(answers) = answers else {
        return "For optimal health, focus on five pillars: nutrition, movement, recovery, stress management and connection. Small improvements in each compound over time.".to_string();
    };

    let mut areas = Vec::new();
    if answers.medical_condition == Some(MedicalCondition::Bad) {
        areas.push("regular medical check-ups");
    }
    if answers.is_smoker() {
        areas.push("smoking cessation");
    }
    if answers.sleep_patterns == Some(SleepPattern::Insomnia) {
        areas.push("sleep quality");
    }
    if matches!(
        answers.exercise_frequency,
        Some(ExerciseFrequency::Occasionally | ExerciseFrequency::Never)
    ) {
        areas.push("regular physical activity");
    }
    if matches!(
        answers.diet_type,
        Some(DietType::Processed | DietType::HighSugar)
    ) {
        areas.push("whole food nutrition");
    }

    let mut response = String::from("Based on your profile, ");
    if areas.is_empty() {
        response.push_str("you're already making many good health choices. Keep fine-tuning your habits for even better results. ");
    } else {
        response.push_str(&format!(
            "focusing on {} could significantly improve your overall health and potentially extend your lifespan. ",
            areas.join(", ")
        ));
    }
    response.push_str("Consistent small improvements beat short-term drastic changes.");
    response
}
