use super::*;

use std::fs;

#[test]
fn required_trims_and_rejects_blank() {
    assert_eq!(required("first_name", "  Ada ").expect("value"), "Ada");
    assert!(matches!(
        required("first_name", "   "),
        Err(ValidationError::Missing {
            field: "first_name"
        })
    ));
}

#[test]
fn email_shapes() {
    for ok in ["ada@example.com", "a.b+tag@mail.example.co", "x@localhost"] {
        assert!(email("email", ok).is_ok(), "{ok} should pass");
    }
    for bad in [
        "ada",
        "@example.com",
        "ada@",
        "ada@@example.com",
        "ada@exa mple.com",
        "ada@-example.com",
        "ada@example..com",
    ] {
        assert!(
            matches!(email("email", bad), Err(ValidationError::InvalidEmail { .. })),
            "{bad} should fail"
        );
    }
    assert!(matches!(
        email("email", ""),
        Err(ValidationError::Missing { field: "email" })
    ));
}

#[test]
fn amount_accepts_any_finite_number() {
    assert_eq!(amount("amount", " 25.50 ").expect("amount"), "25.50");
    assert!(matches!(
        amount("amount", "twelve"),
        Err(ValidationError::NotANumber { .. })
    ));
    assert!(matches!(
        amount("amount", "inf"),
        Err(ValidationError::NotANumber { .. })
    ));
    assert_eq!(amount("amount", "0").expect("zero"), "0");
    assert_eq!(amount("amount", "-3").expect("negative"), "-3");
}

#[test]
fn accept_lists_match_extension_and_mime() {
    for ok in ["passport.PDF", "letter.doc", "letter.docx"] {
        assert!(accepts(DOCUMENT_ACCEPT, Path::new(ok)), "{ok} is a document");
    }
    for bad in ["scan.jpg", "me.png", "setup.exe", "no_extension"] {
        assert!(!accepts(DOCUMENT_ACCEPT, Path::new(bad)), "{bad} is not");
    }

    for ok in ["me.png", "me.jpg", "me.JPEG"] {
        assert!(accepts(PICTURE_ACCEPT, Path::new(ok)), "{ok} is a picture");
    }
    for bad in ["me.gif", "me.webp", "x.svg", "passport.pdf"] {
        assert!(!accepts(PICTURE_ACCEPT, Path::new(bad)), "{bad} is not");
    }

    assert!(accepts(&["application/pdf"], Path::new("form.pdf")));
    assert!(accepts(&["image/*"], Path::new("me.gif")));
}

#[tokio::test]
async fn attachment_reads_accepted_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("me.png");
    fs::write(&path, b"\x89PNG fake").expect("write");

    let attachment = attachment("picture", &path, PICTURE_ACCEPT)
        .await
        .expect("attachment");
    assert_eq!(attachment.file_name, "me.png");
    assert_eq!(attachment.content_type, "image/png");
    assert_eq!(attachment.bytes, b"\x89PNG fake");
}

#[tokio::test]
async fn attachment_rejects_type_before_reading() {
    let err = attachment("picture", Path::new("/does/not/exist.pdf"), PICTURE_ACCEPT)
        .await
        .expect_err("must fail");
    assert!(matches!(
        err,
        ValidationError::FileType {
            field: "picture",
            ..
        }
    ));
}

#[tokio::test]
async fn attachment_reports_unreadable_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = attachment("document", &dir.path().join("gone.pdf"), DOCUMENT_ACCEPT)
        .await
        .expect_err("must fail");
    assert!(matches!(
        err,
        ValidationError::UnreadableFile {
            field: "document",
            ..
        }
    ));
}
