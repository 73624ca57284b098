use beacon_core::models::TokenWindow;

/// Token windows of `size` over a stream of `len` tokens, consecutive windows
/// sharing `overlap` tokens. The last window ends at `len` and may be shorter.
///
/// Callers guarantee `size > 0` and `overlap < size`.
pub fn token_windows(len: usize, size: usize, overlap: usize) -> Vec<TokenWindow> {
    debug_assert!(size > 0 && overlap < size);
    let mut windows = Vec::new();
    let mut start = 0;
    while start < len {
        let end = (start + size).min(len);
        windows.push(TokenWindow { start, end });
        if end == len {
            break;
        }
        start = end - overlap;
    }
    windows
}
