use crate::types::*;

/// An authority is disabled when the mint account carries no key for it.
pub fn evaluate_authorities(
    mint_authority: Option<&str>,
    freeze_authority: Option<&str>,
) -> AuthorityFlags {
    AuthorityFlags {
        mint_authority_disabled: mint_authority.is_none(),
        freeze_authority_disabled: freeze_authority.is_none(),
    }
}
