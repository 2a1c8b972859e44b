use crate::analyzer::SoilAnalysisResult;
use crate::classify::NutrientLevel;

const GAUGE_WIDTH: usize = 10;

/// Markdown formatter for soil analysis results
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Format result as a markdown report
    pub fn format(result: &SoilAnalysisResult) -> String {
        let mut md = String::with_capacity(1024);

        md.push_str(&format!("# {}\n\n", result.soil_type));

        // Input values
        md.push_str("## Your Soil Values\n\n");
        md.push_str("| Measure | Value |\n");
        md.push_str("|---------|-------|\n");
        md.push_str(&format!("| pH | {:.1} |\n", result.sample.ph));
        md.push_str(&format!("| Nitrogen (N) | {} ppm |\n", result.sample.nitrogen));
        md.push_str(&format!("| Phosphorus (P) | {} ppm |\n", result.sample.phosphorus));
        md.push_str(&format!("| Potassium (K) | {} ppm |\n\n", result.sample.potassium));

        md.push_str("## Nutrient Levels\n\n");
        Self::format_gauge(&mut md, "Nitrogen (N)", result.nitrogen_level);
        Self::format_gauge(&mut md, "Phosphorus (P)", result.phosphorus_level);
        Self::format_gauge(&mut md, "Potassium (K)", result.potassium_level);
        md.push('\n');

        md.push_str("## pH Adjustment\n\n");
        md.push_str(&format!("{}\n\n", result.ph_adjustment));

        // Omitted entirely when every nutrient is High
        if !result.fertilizer_recommendations.is_empty() {
            md.push_str("## Fertilizer Recommendations\n\n");
            for line in &result.fertilizer_recommendations {
                md.push_str(&format!("- ✓ {}\n", line));
            }
            md.push('\n');
        }

        md.push_str("## Organic Recommendations\n\n");
        md.push_str(&format!("{}\n\n", result.organic_recommendation));

        md.push_str("## Best Crops for Your Soil\n\n");
        md.push_str(&format!("{}\n", result.suitable_crops.join(" · ")));

        md
    }

    fn format_gauge(md: &mut String, label: &str, level: NutrientLevel) {
        let filled = level.gauge_percent() as usize * GAUGE_WIDTH / 100;
        md.push_str(&format!(
            "- **{}** `{}{}` {}\n",
            label,
            "█".repeat(filled),
            "░".repeat(GAUGE_WIDTH - filled),
            level
        ));
    }
}
