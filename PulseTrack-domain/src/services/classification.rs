use crate::entities::blood_pressure::Category;

/// Categorize blood pressure based on measurements
///
/// Total over all inputs: even physiologically nonsensical pairs return a
/// category. The rules are evaluated in order of decreasing severity, first
/// match wins.
pub fn categorize_blood_pressure(systolic: u16, diastolic: u16) -> Category {
    if systolic >= 180 || diastolic >= 110 {
        Category::HypertensiveCrisis
    } else if systolic >= 140 || diastolic >= 90 {
        Category::HypertensionStage2
    } else if systolic >= 130 || diastolic >= 80 {
        Category::HypertensionStage1
    } else if systolic >= 120 && diastolic < 80 {
        Category::Elevated
    } else {
        Category::Normal
    }
}
