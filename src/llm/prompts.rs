//! Prompt templates for story and hashtag generation

/// System prompt that fixes the story style and length.
pub fn build_story_system_prompt(style: &str) -> String {
    format!(
        "Твоя задача - написать короткую историю, соблюдая требования:\n\
* Стиль: {style}\n\
* Ограничение на длину: 75-150 символов\n"
    )
}

/// User prompt asking for a story about the given themes.
pub fn build_story_prompt(themes: &str) -> String {
    format!("Напиши историю про {themes}, используя эти слова в тексте.")
}

/// User prompt asking for hashtags for a finished story.
pub fn build_hashtag_prompt(story: &str) -> String {
    format!(
        "Выбери и напиши через пробел несколько хэштегов для истории, \
начиная с самых релевантных:\n\n{story}"
    )
}
