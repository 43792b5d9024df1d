use super::*;

#[test]
fn submit_label_follows_save_stage() {
    assert_eq!(submit_label(false, None), "Save Changes");
    assert_eq!(submit_label(true, None), "Saving...");
    assert_eq!(submit_label(true, Some(SaveStage::UploadingImage)), "Uploading image...");
    assert_eq!(submit_label(true, Some(SaveStage::Saving)), "Saving...");
}

#[test]
fn image_button_label_depends_on_preview() {
    assert_eq!(image_button_label(true), "Change image");
    assert_eq!(image_button_label(false), "Upload image");
}

#[test]
fn only_missing_product_leaves_editor() {
    assert!(leaves_editor(&EditorError::NotFound("p1".to_owned())));
    assert!(!leaves_editor(&EditorError::Load(catalog::StoreError::Request("offline".to_owned()))));
}

#[test]
fn reset_for_product_drops_previous_product_state() {
    let owner = Owner::new();
    owner.with(|| {
        let form = RwSignal::new(ProductForm { name: "Shirt".to_owned(), ..ProductForm::default() });
        let new_image = RwSignal::new(Some(ImageUpload {
            file_name: "a.png".to_owned(),
            content_type: "image/png".to_owned(),
            bytes: vec![1, 2, 3],
        }));
        let preview = RwSignal::new("blob:preview".to_owned());
        let error = RwSignal::new(Some("Please enter a valid price"));

        reset_for_product(form, new_image, preview, error);

        assert_eq!(form.get_untracked(), ProductForm::default());
        assert!(new_image.get_untracked().is_none());
        assert!(preview.get_untracked().is_empty());
        assert!(error.get_untracked().is_none());
    });
}
