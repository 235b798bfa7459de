//! Fixed narrative text shown under each chart. Paragraphs are separated by
//! blank lines.

pub const CASES_BY_CONTINENT: &str = "\
North America (35%) and Asia (33.7%) account for the largest share of global COVID-19 cases.

Despite having the largest population, Asia's share is close to North America, indicating widespread transmission across both regions.

Africa shows a very small share (1.4%), which may reflect lower testing, underreporting, or later waves rather than truly low spread.

Oceania's small proportion (4%) reflects strong border control and containment policies during early waves.";

pub const CASES_PER_MILLION: &str = "\
Small countries like Brunei, San Marino, and Austria top the list, showing extremely high cases per million.

This indicates that cases per million is influenced heavily by population size: smaller nations show higher ratios even with moderate absolute cases.

European microstates and developed nations dominate, suggesting extensive testing and reporting accuracy.

High cases per million do not necessarily mean high deaths, indicating better healthcare response.";

pub const DEATHS_PER_MILLION: &str = "\
Peru leads by a large margin, followed by several Eastern European countries.

These regions were hit hard during early waves before vaccination and effective treatment protocols were widely available.

Many of these countries have aging populations and limited ICU capacity, contributing to higher mortality.

This highlights how healthcare readiness and timing of waves influenced death rates more than total case count.";

pub const MONTHLY_TREND: &str = "\
Clear wave patterns are visible, with major peaks around early 2022 and early 2023.

The largest spike occurs in 2022, corresponding to highly transmissible variants (like Omicron).

After 2023, cases decline sharply, showing the combined effect of vaccination, herd immunity, and improved treatments.

Later waves show high cases but comparatively fewer deaths globally.";

pub const DEATH_RATE: &str = "\
Africa shows the highest death rate relative to cases, indicating limited healthcare access and late vaccination rollout.

South America also shows a high death rate, reflecting severe early waves.

Oceania has the lowest death rate, demonstrating effective containment and healthcare management.

Europe and North America have moderate death rates despite high cases, suggesting strong medical infrastructure.";

pub const POSITIVITY_VS_DEATHS: &str = "\
Continents with higher test positivity rates tend to have higher total deaths.

This suggests that when testing is limited (high positivity), many infections go undetected, leading to uncontrolled spread and higher mortality.

Europe and South America show both high positivity and high deaths, indicating overwhelmed healthcare systems during peaks.

Africa and Oceania show lower values, possibly due to lower testing or better containment.";

pub const ICU_BY_CONTINENT: &str = "\
Europe and South America show the highest ICU patient counts, reflecting severe case loads during peak waves.

North America follows, indicating significant strain on healthcare systems.

Africa and Oceania show lower ICU numbers, which may reflect limited ICU capacity rather than lower severity.

High ICU usage strongly correlates with higher death rates observed earlier.";

pub const CONCLUSION: &str = "\
This dashboard shows how COVID-19 affected different continents and countries in different ways.

North America and Asia had the highest number of cases.

Some small and European countries had very high cases and deaths per million.

Africa and South America showed higher death rates, likely due to limited healthcare resources.

Clear waves of infection appeared in 2022 and 2023, after which cases reduced because of vaccines and immunity.

ICU data and positive rate trends show how healthcare pressure and testing levels influenced death rates.

Overall, the analysis shows that healthcare capacity, testing, and timely response played a major role in controlling deaths, not just the number of cases.";

/// Split caption text into paragraphs.
pub fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
    text.split("\n\n").map(str::trim).filter(|p| !p.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captions_split_into_four_paragraphs() {
        for text in [
            CASES_BY_CONTINENT,
            CASES_PER_MILLION,
            DEATHS_PER_MILLION,
            MONTHLY_TREND,
            DEATH_RATE,
            POSITIVITY_VS_DEATHS,
            ICU_BY_CONTINENT,
        ] {
            assert_eq!(paragraphs(text).count(), 4);
        }
        assert_eq!(paragraphs(CONCLUSION).count(), 7);
    }
}
