use std::path::Path;

pub fn build_generation_prompt(target: &Path, description: &str) -> String {
    let file_name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| target.display().to_string());
    format!(
        "Generate the complete file content for a file named `{file_name}`. \
         The file should accomplish the following: {description}. \
         Only output the raw file content, without any explanation or markdown formatting."
    )
}

pub fn build_edit_prompt(original: &str, instructions: &str) -> String {
    format!(
        "You are an expert file editor. The user wants to modify a file. \
         Below is the original content of the file and the user's instructions. \
         Your task is to return the *entire*, *new* content of the file with the modifications applied. \n\n\
         IMPORTANT: Only output the raw, complete, modified file content. \
         Do not include any explanations, greetings, or markdown code fences.\n\n\
         --- ORIGINAL FILE CONTENT ---\n\
         {original}\n\n\
         --- USER INSTRUCTIONS ---\n\
         {instructions}"
    )
}

/// Models sometimes ignore the no-fences instruction; unwrap a single outer fence.
pub fn strip_code_fence(content: &str) -> String {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return content.to_string();
    };
    let Some(body) = rest.strip_suffix("```") else {
        return content.to_string();
    };
    let Some((_info, inner)) = body.split_once('\n') else {
        return content.to_string();
    };
    if inner.contains("\n```") {
        return content.to_string();
    }
    let mut out = inner.to_string();
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
