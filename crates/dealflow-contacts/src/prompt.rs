//! Instructions sent to the extraction model.

pub(crate) const EXTRACTION_PROMPT: &str = r#"You extract structured contact data from web search results.

The input is a text summary of several searches. Each section starts with
"**Search Query:** <query>" and lists results as "- <title>\n  <link>\n  <snippet>",
with results separated by "\n---\n".

Find every relevant contact:
- Decision makers: Owner, Co-Owner, Founder, Co-Founder, CEO, CFO, COO, President,
  Chairman, Managing Partner, Principal.
- Mid-level contacts: VP of Finance, General Manager, other VP-level roles.
- Generic company mailboxes such as info@, contact@ or sales@.

For each contact return an object with these string fields:
- first_name: first name only, properly capitalized ("" for generic emails).
- last_name: last name only, properly capitalized ("" for generic emails).
- title: the job title exactly as written, or "Generic Email".
- linkedin_url: a personal profile URL containing "linkedin.com/in/", otherwise "".
  Never use company pages, posts or non-LinkedIn links here.
- generic_email: the generic address when applicable, otherwise "".
- source_url: the result link that supports the contact.
- company_phone: the company phone number if one appears, otherwise "".
  Use the same company phone for every contact of the company.

Rules:
- List each person once. When the same first and last name appears with different
  titles, keep the most complete title (e.g. "Founder and CEO" over "CEO").
- List each generic email once, and only one generic email per source URL.
  Skip masked addresses such as "infod****e@abc.com".
- Skip engineers, recruiters, technicians, HR staff and placeholders like "Contact 2".
  Leave out middle names and initials.
- Only use information present in the results. Do not guess.

Reply with ONLY a JSON array of contact objects, or [] when nothing qualifies.
"#;
