//! Waiver Email Rendering
//!
//! Produces the HTML body sent to the participant and the
//! administrators. Every user-supplied field is HTML-escaped before
//! interpolation; only the fixed legal text goes in verbatim.

use crate::domain::Submission;

/// pt-BR day/month/year, the locale the form page runs in.
const DATE_FMT: &str = "%d/%m/%Y";

pub fn waiver_email_html(submission: &Submission) -> String {
    let name = escape_html(&submission.full_name);
    let document = escape_html(&submission.id_document);

    let minors_section = if submission.register_minors {
        format!(
            "\
    <h2>Termo de Responsabilidade para Menor(es)</h2>
    <p>Nome(s) do(s) filho(s):</p>
    <p>{names}</p>
    <p>Como responsável legal, assumo total responsabilidade pela segurança do(s) \
menor(es) durante a prática da Escalada Esportiva e me comprometo a supervisionar \
em tempo integral durante toda a atividade.</p>
",
            names = escape_html(&submission.minor_names)
        )
    } else {
        String::new()
    };

    format!(
        "\
    <h1>Termo de Consentimento - Escalada Boulder</h1>
    <p>Data do registro: {registered}</p>

    <h2>Dados do Participante</h2>
    <ul>
      <li>Nome: {name}</li>
      <li>Email: {email}</li>
      <li>Data de Nascimento: {birth}</li>
      <li>Documento: {document}</li>
      <li>Telefone para emergência: {phone}</li>
    </ul>

    <h2>Termo de Consentimento e Isenção de Responsabilidade</h2>
    <p>Eu, {name}, portador(a) do documento de identificação {document}, declaro que:</p>
    <ul>
      <li>Tenho 18 anos ou mais, sendo legalmente responsável por minhas decisões e \
assumindo os riscos envolvidos na prática da Escalada Esportiva – Modalidade Boulder.</li>
      <li>Estou ciente dos riscos inerentes à prática, incluindo:
        <ul>
          <li>Quedas e impactos contra o solo ou paredes</li>
          <li>Lesões como torções, contusões e fraturas</li>
          <li>Riscos associados ao uso inadequado da estrutura ou falta de experiência</li>
        </ul>
      </li>
      <li>Estou ciente de que não há supervisão profissional fornecida pela Prefeitura.</li>
      <li>Reconheço que o muro recebe manutenção pela comunidade local de escaladores.</li>
    </ul>

{minors_section}
    <h2>Assinatura Digital</h2>
    <img src=\"{signature}\" alt=\"Assinatura Digital\" \
style=\"max-width: 100%; border: 1px solid #ccc; margin-top: 20px;\" />
",
        registered = submission.submitted_at.format(DATE_FMT),
        name = name,
        email = escape_html(submission.email.as_str()),
        birth = submission.birth_date.format(DATE_FMT),
        document = document,
        phone = escape_html(&submission.emergency_phone),
        signature = escape_html(submission.signature.as_data_uri()),
        minors_section = minors_section,
    )
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Submission, SubmissionForm};

    fn form() -> SubmissionForm {
        SubmissionForm {
            full_name: "Maria Souza".into(),
            email: "maria@example.com".into(),
            birth_date: "1990-05-14".into(),
            id_document: "123.456.789-00".into(),
            emergency_phone: "+55 12 99999-0000".into(),
            register_minors: false,
            minor_names: String::new(),
            accepts_terms: true,
            signature_image: "data:image/png;base64,iVBORw0KGgo=".into(),
        }
    }

    #[test]
    fn test_renders_participant_fields() {
        let sub = Submission::from_form(form()).unwrap();
        let html = waiver_email_html(&sub);
        assert!(html.contains("Nome: Maria Souza"));
        assert!(html.contains("Email: maria@example.com"));
        assert!(html.contains("Data de Nascimento: 14/05/1990"));
        assert!(html.contains("src=\"data:image/png;base64,iVBORw0KGgo=\""));
    }

    #[test]
    fn test_no_guardian_clause_without_minors() {
        let sub = Submission::from_form(form()).unwrap();
        let html = waiver_email_html(&sub);
        assert!(!html.contains("Termo de Responsabilidade para Menor(es)"));
    }

    #[test]
    fn test_guardian_clause_lists_minor_names() {
        let sub = Submission::from_form(SubmissionForm {
            register_minors: true,
            minor_names: "João Souza, Ana Souza".into(),
            ..form()
        })
        .unwrap();
        let html = waiver_email_html(&sub);
        assert!(html.contains("Termo de Responsabilidade para Menor(es)"));
        assert!(html.contains("João Souza, Ana Souza"));
    }

    #[test]
    fn test_user_fields_are_escaped() {
        let sub = Submission::from_form(SubmissionForm {
            full_name: "<script>alert('x')</script>".into(),
            ..form()
        })
        .unwrap();
        let html = waiver_email_html(&sub);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"a&b<c>"d'"#), "a&amp;b&lt;c&gt;&quot;d&#39;");
        assert_eq!(escape_html("plain"), "plain");
    }
}
