// src/prompt/builder.rs
// Tutor instruction and per-request message for a practice attempt

use crate::types::PracticeInput;

/// Fixed instruction sent as the system turn of every practice call.
/// Describes the feedback object the model must return.
pub fn system_prompt() -> String {
    let mut prompt = String::new();

    prompt.push_str("You are a Sri Lankan spoken English tutor. Return compact JSON with keys: ");
    prompt.push_str("score (0-100 integer), fluency (short), pronunciation (short), errors (array of {what, fix}), ");
    prompt.push_str("corrected (string), tips (array or string), practice_variation (string). ");
    prompt.push_str("If mode==='explain' include keys 'sinhala' and 'transliteration'. ");
    prompt.push_str("Use student-friendly Sinhala examples when requested. ");
    prompt.push_str("Output only valid JSON.");

    prompt
}

/// Per-request user turn comparing the learner's transcript against the target
pub fn user_message(input: &PracticeInput) -> String {
    format!(
        "Target: \"{}\"\nTranscript: \"{}\"\nMode: {}\nLevel: {}\nCompare transcript to target.",
        input.target_text,
        input.transcript,
        input.mode.as_str(),
        input.level
    )
}

/// Both turns for one practice call, system first
pub fn build_practice_prompts(input: &PracticeInput) -> (String, String) {
    (system_prompt(), user_message(input))
}
