//! Prompt templates sent to the provider.

/// Compose the advice prompt from the user's question and detected labels.
///
/// # Examples
///
/// ```
/// use ecocycle_advice::compose_advice_prompt;
///
/// let prompt = compose_advice_prompt("Can I recycle these?", &["cup".into(), "laptop".into()]);
/// assert!(prompt.contains("Detected Items: cup, laptop"));
/// assert!(prompt.contains("User Question: Can I recycle these?"));
///
/// let prompt = compose_advice_prompt("Anything?", &[]);
/// assert!(prompt.contains("No items detected."));
/// ```
pub fn compose_advice_prompt(question: &str, context_labels: &[String]) -> String {
    let items = if context_labels.is_empty() {
        "No items detected.".to_string()
    } else {
        format!("Detected Items: {}", context_labels.join(", "))
    };
    format!(
        "You are a helpful recycling assistant. Analyze the following items detected in an image and provide practical advice.\n\
         {items}\n\
         User Question: {question}\n\
         Provide clear, actionable recycling or disposal advice for the detected items in plain text. \
         Do not use Markdown (e.g., **, *, #), special characters, or formatting. Return only plain text."
    )
}

/// Prompt asking for a five-part analysis of item counts.
///
/// `counts` is rendered in the given order, one `- label: n items` line each.
pub fn waste_habits_prompt(counts: &[(String, usize)]) -> String {
    let lines = counts
        .iter()
        .map(|(label, count)| format!("- {label}: {count} items"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "As a Waste Analysis AI, analyze these waste disposal patterns and provide personalized recommendations:\n\
         \n\
         Waste Items (last 7 days):\n\
         {lines}\n\
         \n\
         Provide analysis in this format:\n\
         1. Key Patterns\n\
         2. Environmental Impact\n\
         3. Specific Recommendations\n\
         4. Sustainable Alternatives\n\
         5. Action Items\n\
         \n\
         Focus on practical, achievable suggestions for reducing waste and improving recycling habits. \
         Return the response in plain text without Markdown (e.g., **, *, #) or special characters."
    )
}

/// Prompt asking for a sectioned disposal guide for one item type.
pub fn disposal_guide_prompt(item_type: &str) -> String {
    format!(
        "Provide a professional disposal guide for: {item_type}\n\
         \n\
         Material Composition:\n\
         [List main materials]\n\
         \n\
         Disposal Steps:\n\
         [Numbered steps]\n\
         \n\
         Safety Guidelines:\n\
         [Key safety points]\n\
         \n\
         Recycling Options:\n\
         [Available recycling methods]\n\
         \n\
         Environmental Considerations:\n\
         [Impact and alternatives]\n\
         \n\
         Format the response in clear sections without any markdown or special characters."
    )
}
