/// Prompt asking the model to tailor a CV to a job offer
///
/// The answer must be markdown restricted to what the layout engine renders:
/// headings, lists, pipe tables and inline emphasis.
pub fn rewrite_prompt(cv_text: &str, job_offer: &str) -> String {
    format!(
        r####"Eres un experto en recursos humanos y redacción de currículums. Tu tarea es optimizar el siguiente CV para que se ajuste lo mejor posible a la oferta de trabajo indicada.

OFERTA DE TRABAJO:
{job_offer}

CV ACTUAL:
{cv_text}

INSTRUCCIONES:
1. Reescribe el CV destacando la experiencia, habilidades y logros más relevantes para la oferta.
2. Usa palabras clave de la oferta de forma natural, sin inventar experiencia ni datos.
3. Mantén un tono profesional y conciso.
4. Responde únicamente con el CV en formato markdown:
   - "# " para el nombre completo
   - "## " para cada sección (Perfil, Experiencia, Formación, Habilidades...)
   - "### " para puestos o titulaciones
   - "- " para los logros y responsabilidades
   - tablas con "|" para resumir habilidades
   - **negrita** para resaltar datos clave
5. No incluyas explicaciones, comentarios ni bloques de código."####
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_inputs() {
        let prompt = rewrite_prompt("Jane Doe, Rust developer", "Backend engineer in Madrid");
        assert!(prompt.contains("Jane Doe, Rust developer"));
        assert!(prompt.contains("Backend engineer in Madrid"));
        assert!(prompt.find("OFERTA DE TRABAJO").unwrap() < prompt.find("CV ACTUAL").unwrap());
    }
}
