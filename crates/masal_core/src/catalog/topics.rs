//! Static topic table served by the catalog.

use super::{Subtopic, Topic};

pub(super) static TOPICS: &[Topic] = &[
    Topic {
        id: "vucudumuz",
        name: "Vücudumuzu Tanıyalım",
        icon: "heart",
        color: "rose",
        description: "Organlarımız ve sağlıklı yaşam",
        image: "https://images.unsplash.com/photo-1559757175-5700dde675bc?w=400",
        subtopics: &[
            Subtopic { id: "organlar", name: "Organlarımız", kazanim: "Vücudundaki temel organları tanır ve görevlerini basit düzeyde açıklar." },
            Subtopic { id: "kalp", name: "Kalbim nasıl çalışır?", kazanim: "Kalbin vücuttaki görevini ve önemini fark eder." },
            Subtopic { id: "akciger", name: "Akciğerler ve nefes alma", kazanim: "Nefes almanın yaşamsal önemini kavrar." },
            Subtopic { id: "beyin", name: "Beynim ve düşünme", kazanim: "Beynin düşünme ve öğrenmedeki rolünü fark eder." },
            Subtopic { id: "duyular", name: "Duyularımız", kazanim: "Beş duyu organını ayırt eder ve günlük yaşamda kullanımını fark eder." },
            Subtopic { id: "dis", name: "Diş sağlığı", kazanim: "Diş sağlığını korumaya yönelik alışkanlıklar geliştirir." },
            Subtopic { id: "kemik", name: "Kemiklerimiz ve kaslarımız", kazanim: "İskelet ve kasların hareket için önemini kavrar." },
            Subtopic { id: "beslenme", name: "Sağlıklı beslenme", kazanim: "Sağlıklı ve sağlıksız besinleri ayırt eder." },
            Subtopic { id: "temizlik", name: "Temizlik ve hijyen", kazanim: "Kişisel temizliğin sağlık için önemini fark eder." },
            Subtopic { id: "uyku", name: "Uyku ve dinlenme", kazanim: "Yeterli uykunun sağlık için önemini kavrar." },
        ],
    },
    Topic {
        id: "doga",
        name: "Doğa ve Çevre",
        icon: "leaf",
        color: "emerald",
        description: "Doğayı tanıyalım ve koruyalım",
        image: "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?w=400",
        subtopics: &[
            Subtopic { id: "koruma", name: "Doğayı koruyalım", kazanim: "Doğayı korumaya yönelik sorumluluk geliştirir." },
            Subtopic { id: "geridonusum", name: "Geri dönüşüm", kazanim: "Atıkların ayrıştırılmasının çevreye katkısını fark eder." },
            Subtopic { id: "agaclar", name: "Ağaçlar ve ormanlar", kazanim: "Ağaçların canlılar için önemini kavrar." },
            Subtopic { id: "su", name: "Su tasarrufu", kazanim: "Suyun bilinçli kullanımının önemini kavrar." },
            Subtopic { id: "mevsimler", name: "Mevsimler", kazanim: "Mevsimlerin temel özelliklerini ayırt eder." },
            Subtopic { id: "hava", name: "Hava olayları", kazanim: "Farklı hava olaylarını tanır ve etkilerini fark eder." },
            Subtopic { id: "toprak", name: "Toprak ve bitkiler", kazanim: "Bitkilerin büyüme sürecini fark eder." },
            Subtopic { id: "canlilar", name: "Doğadaki canlılar", kazanim: "Doğadaki canlı çeşitliliğini fark eder." },
            Subtopic { id: "cevre_temizlik", name: "Çevre temizliği", kazanim: "Çevreyi temiz tutmanın önemini kavrar." },
            Subtopic { id: "iklim", name: "İklim ve doğa dengesi", kazanim: "İklim değişikliğinin doğa üzerindeki etkilerini fark eder." },
        ],
    },
    Topic {
        id: "hayvanlar",
        name: "Hayvanlar Dünyası",
        icon: "cat",
        color: "amber",
        description: "Hayvanları tanıyalım ve sevelim",
        image: "https://images.unsplash.com/photo-1474511320723-9a56873571b7?w=400",
        subtopics: &[
            Subtopic { id: "evcil", name: "Evcil hayvanlar", kazanim: "Evcil hayvanların bakım ihtiyaçlarını fark eder." },
            Subtopic { id: "vahsi", name: "Vahşi hayvanlar", kazanim: "Vahşi hayvanların yaşam alanlarını tanır." },
            Subtopic { id: "deniz", name: "Deniz canlıları", kazanim: "Deniz canlılarının çeşitliliğini fark eder." },
            Subtopic { id: "orman", name: "Orman hayvanları", kazanim: "Orman ekosisteminde yaşayan hayvanları tanır." },
            Subtopic { id: "ciftlik", name: "Çiftlik hayvanları", kazanim: "Çiftlik hayvanlarının insanlara faydalarını kavrar." },
            Subtopic { id: "yuvalar", name: "Hayvanların yuvaları", kazanim: "Farklı hayvanların barınma şekillerini öğrenir." },
            Subtopic { id: "beslenmesi", name: "Hayvanların beslenmesi", kazanim: "Hayvanların farklı beslenme şekillerini fark eder." },
            Subtopic { id: "sevgi", name: "Hayvan sevgisi", kazanim: "Hayvanlara karşı sevgi ve saygı geliştirir." },
            Subtopic { id: "nesli", name: "Nesli tükenen hayvanlar", kazanim: "Nesli tehlike altındaki hayvanları koruma bilinci geliştirir." },
            Subtopic { id: "insan", name: "Hayvanlar ve insanlar", kazanim: "İnsan-hayvan ilişkisinin önemini kavrar." },
        ],
    },
    Topic {
        id: "degerler",
        name: "Değerler Eğitimi",
        icon: "star",
        color: "violet",
        description: "İyi insan olmanın temelleri",
        image: "https://images.unsplash.com/photo-1529156069898-49953e39b3ac?w=400",
        subtopics: &[
            Subtopic { id: "paylasma", name: "Paylaşmak", kazanim: "Paylaşmanın sosyal ilişkileri güçlendirdiğini fark eder." },
            Subtopic { id: "yardim", name: "Yardımlaşma", kazanim: "İş birliği ve yardımlaşmanın önemini kavrar." },
            Subtopic { id: "durustluk", name: "Dürüstlük", kazanim: "Doğruyu söylemenin önemini fark eder." },
            Subtopic { id: "saygi", name: "Saygı", kazanim: "Kendisine ve başkalarına saygılı davranır." },
            Subtopic { id: "sevgi", name: "Sevgi", kazanim: "Sevginin ilişkilerdeki önemini kavrar." },
            Subtopic { id: "sorumluluk", name: "Sorumluluk", kazanim: "Üzerine düşen görevleri yerine getirme bilinci geliştirir." },
            Subtopic { id: "sabir", name: "Sabır", kazanim: "Sabırlı olmanın önemini fark eder." },
            Subtopic { id: "empati", name: "Empati", kazanim: "Başkalarının duygularını anlamaya çalışır." },
            Subtopic { id: "hosgoru", name: "Hoşgörü", kazanim: "Farklılıklara karşı hoşgörülü olmayı öğrenir." },
            Subtopic { id: "adalet", name: "Adalet", kazanim: "Adil davranmanın önemini kavrar." },
        ],
    },
    Topic {
        id: "duygular",
        name: "Duygularımız",
        icon: "smile",
        color: "pink",
        description: "Duygularımızı tanıyalım ve ifade edelim",
        image: "https://images.unsplash.com/photo-1491013516836-7db643ee125a?w=400",
        subtopics: &[
            Subtopic { id: "mutluluk", name: "Mutluluk", kazanim: "Duygularını tanır ve ifade eder." },
            Subtopic { id: "uzuntu", name: "Üzüntü", kazanim: "Üzüntü duygusunu sağlıklı şekilde ifade etmeyi öğrenir." },
            Subtopic { id: "korku", name: "Korku", kazanim: "Korku duygusunun doğal olduğunu fark eder." },
            Subtopic { id: "ofke", name: "Öfke ve sakinleşme", kazanim: "Öfke duygusunu uygun yollarla kontrol etmeyi öğrenir." },
            Subtopic { id: "kiskanclik", name: "Kıskançlık", kazanim: "Kıskançlık duygusunu tanır ve yönetmeyi öğrenir." },
            Subtopic { id: "heyecan", name: "Heyecan", kazanim: "Heyecan duygusunu olumlu şekilde yaşamayı öğrenir." },
            Subtopic { id: "cesaret", name: "Cesaret", kazanim: "Cesur olmanın önemini kavrar." },
            Subtopic { id: "utangaclik", name: "Utangaçlık", kazanim: "Utangaçlıkla başa çıkma yollarını öğrenir." },
            Subtopic { id: "ozguven", name: "Öz güven", kazanim: "Kendine güven duygusu geliştirir." },
            Subtopic { id: "ifade", name: "Duygularımı ifade ediyorum", kazanim: "Duygularını uygun şekilde ifade etmeyi öğrenir." },
        ],
    },
    Topic {
        id: "okul",
        name: "Okul ve Sosyal Yaşam",
        icon: "school",
        color: "sky",
        description: "Okul hayatı ve arkadaşlık",
        image: "https://images.unsplash.com/photo-1503676260728-1c00da094a0b?w=400",
        subtopics: &[
            Subtopic { id: "baslama", name: "Okula başlama", kazanim: "Okul ortamına uyum sağlar." },
            Subtopic { id: "ogretmen", name: "Öğretmen sevgisi", kazanim: "Öğretmenine saygı ve sevgi duyar." },
            Subtopic { id: "arkadaslik", name: "Arkadaşlık", kazanim: "Sağlıklı arkadaşlık ilişkileri kurar." },
            Subtopic { id: "kurallar", name: "Sınıf kuralları", kazanim: "Toplumsal yaşamda kuralların gerekliliğini fark eder." },
            Subtopic { id: "sira", name: "Sıra bekleme", kazanim: "Sabır ve öz denetim geliştirir." },
            Subtopic { id: "oynama", name: "Paylaşarak oynamak", kazanim: "Oyunlarda paylaşmanın önemini kavrar." },
            Subtopic { id: "grup", name: "Grup çalışması", kazanim: "Grup içinde iş birliği yapar." },
            Subtopic { id: "uyum", name: "Kurallara uymak", kazanim: "Kurallara uymanın toplum için önemini kavrar." },
            Subtopic { id: "okul_yardim", name: "Okulda yardımlaşma", kazanim: "Okul arkadaşlarıyla yardımlaşmayı öğrenir." },
            Subtopic { id: "basari", name: "Başarı ve çaba", kazanim: "Başarının çabayla geldiğini fark eder." },
        ],
    },
    Topic {
        id: "guvenlik",
        name: "Günlük Yaşam ve Güvenlik",
        icon: "shield",
        color: "orange",
        description: "Güvenli yaşam kuralları",
        image: "https://images.unsplash.com/photo-1582213782179-e0d53f98f2ca?w=400",
        subtopics: &[
            Subtopic { id: "trafik", name: "Trafik kuralları", kazanim: "Temel trafik kurallarını fark eder." },
            Subtopic { id: "ev", name: "Evde güvenlik", kazanim: "Evde karşılaşılabilecek riskleri tanır." },
            Subtopic { id: "sokak", name: "Sokakta güvenlik", kazanim: "Sokakta güvenli davranışlar sergiler." },
            Subtopic { id: "yabanci", name: "Yabancılarla iletişim", kazanim: "Yabancılarla güvenli iletişim kurmayı öğrenir." },
            Subtopic { id: "acil", name: "Acil durumlar", kazanim: "Acil durumlarda yardım istemeyi öğrenir." },
            Subtopic { id: "internet", name: "İnterneti güvenli kullanma", kazanim: "Dijital ortamlarda güvenli davranışlar sergiler." },
            Subtopic { id: "teknoloji", name: "Teknolojiyle dengeli zaman", kazanim: "Teknolojiyi dengeli kullanmanın önemini kavrar." },
            Subtopic { id: "sinirlar", name: "Kişisel sınırlar", kazanim: "Kendi beden sınırlarını fark eder." },
            Subtopic { id: "aliskanlik", name: "Sağlıklı alışkanlıklar", kazanim: "Günlük sağlıklı alışkanlıklar geliştirir." },
            Subtopic { id: "zaman", name: "Zamanı verimli kullanma", kazanim: "Zamanı verimli kullanmanın önemini kavrar." },
        ],
    },
    Topic {
        id: "saglik",
        name: "Sağlıklı Yaşam",
        icon: "activity",
        color: "teal",
        description: "Sağlıklı yaşam alışkanlıkları",
        image: "https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b?w=400",
        subtopics: &[
            Subtopic { id: "dengeli", name: "Dengeli beslenme", kazanim: "Dengeli beslenmenin vücuda faydalarını kavrar." },
            Subtopic { id: "spor", name: "Spor ve hareket", kazanim: "Fiziksel aktivitenin sağlık için önemini fark eder." },
            Subtopic { id: "mikrop", name: "Mikroplar ve hastalıklar", kazanim: "Mikroplardan korunma yollarını öğrenir." },
            Subtopic { id: "temizlik_al", name: "Temizlik alışkanlıkları", kazanim: "Günlük temizlik alışkanlıkları geliştirir." },
            Subtopic { id: "doktor", name: "Doktordan korkmamak", kazanim: "Sağlık kontrollerinin önemini kavrar." },
            Subtopic { id: "secim", name: "Sağlıklı seçimler", kazanim: "Sağlıklı seçimler yapmayı öğrenir." },
            Subtopic { id: "koruma", name: "Vücudumu koruyorum", kazanim: "Vücudunu korumaya yönelik davranışlar geliştirir." },
            Subtopic { id: "dinlenme", name: "Dinlenmenin önemi", kazanim: "Dinlenme ve uykunun önemini kavrar." },
            Subtopic { id: "su_icme", name: "Su içme alışkanlığı", kazanim: "Yeterli su içmenin sağlık için önemini fark eder." },
            Subtopic { id: "rutin", name: "Sağlıklı rutinler", kazanim: "Günlük sağlıklı rutinler oluşturmayı öğrenir." },
        ],
    },
    Topic {
        id: "akademik",
        name: "Temel Akademik Kavramlar",
        icon: "book",
        color: "indigo",
        description: "Öğrenmenin temelleri",
        image: "https://images.unsplash.com/photo-1503676260728-1c00da094a0b?w=400",
        subtopics: &[
            Subtopic { id: "sayilar", name: "Sayılar", kazanim: "Nesneleri sayar ve eşleştirir." },
            Subtopic { id: "renkler", name: "Renkler", kazanim: "Ana ve ara renkleri ayırt eder." },
            Subtopic { id: "sekiller", name: "Şekiller", kazanim: "Temel geometrik şekilleri tanır." },
            Subtopic { id: "zitlar", name: "Zıt kavramlar", kazanim: "Zıt kavramları ayırt eder." },
            Subtopic { id: "buyuk_kucuk", name: "Büyük – küçük", kazanim: "Büyüklük-küçüklük kavramlarını karşılaştırır." },
            Subtopic { id: "az_cok", name: "Az – çok", kazanim: "Miktar kavramlarını karşılaştırır." },
            Subtopic { id: "once_sonra", name: "Önce – sonra", kazanim: "Sıralama kavramını kavrar." },
            Subtopic { id: "zaman_kav", name: "Zaman kavramı", kazanim: "Günlük zaman dilimlerini fark eder." },
            Subtopic { id: "mekan", name: "Mekân kavramı", kazanim: "Mekânsal ilişkileri kavrar." },
            Subtopic { id: "problem", name: "Problem çözme", kazanim: "Basit problemleri çözme becerisi geliştirir." },
        ],
    },
    Topic {
        id: "kultur",
        name: "Kültür ve Toplum",
        icon: "users",
        color: "purple",
        description: "Toplum ve birlikte yaşam",
        image: "https://images.unsplash.com/photo-1529156069898-49953e39b3ac?w=400",
        subtopics: &[
            Subtopic { id: "aile", name: "Aile", kazanim: "Aile bireylerinin rollerini tanır." },
            Subtopic { id: "buyukler", name: "Büyüklerimize saygı", kazanim: "Büyüklere saygı göstermenin önemini kavrar." },
            Subtopic { id: "komsuluk", name: "Komşuluk", kazanim: "İyi komşuluk ilişkilerinin önemini fark eder." },
            Subtopic { id: "bayramlar", name: "Bayramlar", kazanim: "Bayramların kültürel önemini kavrar." },
            Subtopic { id: "gelenekler", name: "Gelenekler", kazanim: "Kültürel geleneklerin önemini fark eder." },
            Subtopic { id: "yardim_kamp", name: "Yardım kampanyaları", kazanim: "Yardımlaşmanın toplumsal önemini kavrar." },
            Subtopic { id: "farkliliklar", name: "Farklılıklar", kazanim: "Farklılıklara saygı duymayı öğrenir." },
            Subtopic { id: "birlikte", name: "Birlikte yaşamak", kazanim: "Toplumsal uyumun önemini kavrar." },
            Subtopic { id: "toplumsal", name: "Toplumsal kurallar", kazanim: "Toplum kurallarına uymanın önemini fark eder." },
            Subtopic { id: "paylasma_kult", name: "Paylaşma kültürü", kazanim: "Paylaşma kültürünün değerini kavrar." },
        ],
    },
    Topic {
        id: "bilim",
        name: "Bilim ve Keşif",
        icon: "rocket",
        color: "cyan",
        description: "Merak et, keşfet, öğren",
        image: "https://images.unsplash.com/photo-1451187580459-43490279c0fa?w=400",
        subtopics: &[
            Subtopic { id: "uzay", name: "Uzay ve gezegenler", kazanim: "Uzay ve gezegenleri merak eder." },
            Subtopic { id: "gunes_ay", name: "Güneş ve Ay", kazanim: "Güneş ve Ay'ın özelliklerini öğrenir." },
            Subtopic { id: "deneyler", name: "Basit deneyler", kazanim: "Basit deneylerle bilimsel düşünme becerisi geliştirir." },
            Subtopic { id: "merak", name: "Merak etmek", kazanim: "Merakın öğrenme için önemini kavrar." },
            Subtopic { id: "bilim_insani", name: "Bilim insanları", kazanim: "Bilim insanlarının çalışmalarını tanır." },
            Subtopic { id: "teknoloji_ne", name: "Teknoloji nedir?", kazanim: "Teknolojinin hayatımızdaki yerini fark eder." },
            Subtopic { id: "makineler", name: "Makineler nasıl çalışır?", kazanim: "Basit makinelerin çalışma prensiplerini merak eder." },
            Subtopic { id: "neden_sonuc", name: "Neden–sonuç ilişkisi", kazanim: "Neden-sonuç ilişkisi kurmayı öğrenir." },
            Subtopic { id: "kesfetmek", name: "Keşfetmek", kazanim: "Yeni şeyler keşfetmenin heyecanını yaşar." },
            Subtopic { id: "soru", name: "Soru sormak", kazanim: "Soru sormanın öğrenmedeki önemini kavrar." },
        ],
    },
    Topic {
        id: "sanat",
        name: "Sanat ve Yaratıcılık",
        icon: "palette",
        color: "fuchsia",
        description: "Hayal gücü ve yaratıcılık",
        image: "https://images.unsplash.com/photo-1513364776144-60967b0f800f?w=400",
        subtopics: &[
            Subtopic { id: "resim", name: "Resim yapmak", kazanim: "Resim yaparak kendini ifade eder." },
            Subtopic { id: "muzik", name: "Müzik", kazanim: "Müziğin duygular üzerindeki etkisini fark eder." },
            Subtopic { id: "ritim", name: "Ritim ve sesler", kazanim: "Ritim duygusunu geliştirir." },
            Subtopic { id: "dans", name: "Dans etmek", kazanim: "Dansla kendini ifade etmeyi öğrenir." },
            Subtopic { id: "hayal", name: "Hayal gücü", kazanim: "Hayal gücünü kullanarak yaratıcılık geliştirir." },
            Subtopic { id: "drama", name: "Drama ve canlandırma", kazanim: "Drama etkinlikleriyle empati geliştirir." },
            Subtopic { id: "el", name: "El becerileri", kazanim: "İnce motor becerilerini geliştirir." },
            Subtopic { id: "renk_duygu", name: "Renklerle duygular", kazanim: "Renklerin duygularla ilişkisini keşfeder." },
            Subtopic { id: "ifade_sanat", name: "Sanatla ifade", kazanim: "Sanat yoluyla duygularını ifade etmeyi öğrenir." },
            Subtopic { id: "yaratici", name: "Yaratıcı düşünme", kazanim: "Yaratıcı düşünme becerisi geliştirir." },
        ],
    },
    Topic {
        id: "ahlak",
        name: "Değerler ve Ahlak",
        icon: "heart-handshake",
        color: "red",
        description: "Evrensel ahlaki değerler",
        image: "https://images.unsplash.com/photo-1469571486292-0ba58a3f068b?w=400",
        subtopics: &[
            Subtopic { id: "iyilik", name: "İyilik yapmak", kazanim: "İyilik yapmanın mutluluk verdiğini fark eder." },
            Subtopic { id: "dogru", name: "Doğruyu söylemek", kazanim: "Doğruyu söylemenin değerini kavrar." },
            Subtopic { id: "sabir_ahlak", name: "Sabırlı olmak", kazanim: "Sabrın önemini kavrar." },
            Subtopic { id: "affetmek", name: "Affetmek", kazanim: "Affetmenin huzur getirdiğini fark eder." },
            Subtopic { id: "sukretmek", name: "Şükretmek", kazanim: "Sahip olduklarına şükretmeyi öğrenir." },
            Subtopic { id: "emanet", name: "Emanete sahip çıkmak", kazanim: "Emanete sahip çıkmanın önemini kavrar." },
            Subtopic { id: "yardim_ahlak", name: "Yardımseverlik", kazanim: "Yardımseverliğin değerini kavrar." },
            Subtopic { id: "guzel", name: "Güzel davranışlar", kazanim: "Güzel davranışların önemini fark eder." },
            Subtopic { id: "vicdan", name: "Vicdan", kazanim: "Vicdanın davranışlara rehberlik ettiğini kavrar." },
            Subtopic { id: "iyi_insan", name: "İyi insan olmak", kazanim: "İyi insan olma bilinci geliştirir." },
        ],
    },
    Topic {
        id: "oz_bakim",
        name: "Öz Bakım ve Bağımsızlık",
        icon: "sparkles",
        color: "lime",
        description: "Kendi işlerimi yapabiliyorum",
        image: "https://images.unsplash.com/photo-1503454537195-1dcabb73ffb9?w=400",
        subtopics: &[
            Subtopic { id: "giyinme", name: "Kendi başıma giyinirim", kazanim: "Kendi başına giyinme becerisi geliştirir." },
            Subtopic { id: "toplama", name: "Eşyalarımı toplarım", kazanim: "Düzen alışkanlığı kazanır." },
            Subtopic { id: "sorumluluk_oz", name: "Sorumluluk alırım", kazanim: "Yaşına uygun sorumluluklar alır." },
            Subtopic { id: "guven_oz", name: "Kendime güveniyorum", kazanim: "Öz güven geliştirir." },
            Subtopic { id: "hata", name: "Hata yapabilirim", kazanim: "Hatalardan öğrenmenin değerini kavrar." },
            Subtopic { id: "denemek", name: "Denemekten korkmam", kazanim: "Yeni şeyler deneme cesareti geliştirir." },
            Subtopic { id: "karar", name: "Karar vermek", kazanim: "Basit kararlar alma becerisi geliştirir." },
            Subtopic { id: "tanima", name: "Kendimi tanıyorum", kazanim: "Kendini tanıma becerisi geliştirir." },
            Subtopic { id: "bitirme", name: "Başladığımı bitiririm", kazanim: "İşlerini tamamlama alışkanlığı kazanır." },
            Subtopic { id: "bagimsizlik", name: "Bağımsızlık", kazanim: "Yaşına uygun bağımsızlık kazanır." },
        ],
    },
    Topic {
        id: "ozel",
        name: "Özel Temalar",
        icon: "bookmark",
        color: "slate",
        description: "Öğretmen favorileri ve özel durumlar",
        image: "https://images.unsplash.com/photo-1503676260728-1c00da094a0b?w=400",
        subtopics: &[
            Subtopic { id: "ilk_gun", name: "İlk gün masalı", kazanim: "Yeni başlangıçlara uyum sağlar." },
            Subtopic { id: "sinif_uyum", name: "Sınıf uyum masalı", kazanim: "Sınıf ortamına uyum sağlar." },
            Subtopic { id: "yeni_kardes", name: "Yeni kardeş masalı", kazanim: "Kardeş ilişkilerini olumlu şekilde geliştirir." },
            Subtopic { id: "tasinma", name: "Taşınma masalı", kazanim: "Değişimlere uyum sağlamayı öğrenir." },
            Subtopic { id: "hastane", name: "Hastane masalı", kazanim: "Hastane korkusunu yenmeyi öğrenir." },
            Subtopic { id: "dis_doktor", name: "Diş doktoru masalı", kazanim: "Diş doktoru korkusunu yener." },
            Subtopic { id: "kardes_kisk", name: "Kardeş kıskançlığı", kazanim: "Kardeş kıskançlığıyla başa çıkmayı öğrenir." },
            Subtopic { id: "kural_uyma", name: "Kurallara uyma masalı", kazanim: "Kurallara uymanın önemini kavrar." },
            Subtopic { id: "paylasma_ozel", name: "Paylaşma masalı", kazanim: "Paylaşmanın mutluluk getirdiğini fark eder." },
            Subtopic { id: "cesaret_ozel", name: "Cesaret masalı", kazanim: "Cesur olmanın önemini kavrar." },
        ],
    },
];
